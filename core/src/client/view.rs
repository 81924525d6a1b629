use std::fmt;

use chrono::NaiveDate;

use crate::model::task::{Priority, Status, Task, TaskId};

pub const LOADING_PLACEHOLDER: &str = "Loading tasks...";
pub const EMPTY_PLACEHOLDER: &str = "No tasks yet. Create your first task!";
pub const FAILED_PLACEHOLDER: &str = "Could not load tasks";
pub const NO_DEADLINE: &str = "No deadline";

/// What the list region currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TaskList {
    #[default]
    Loading,
    Empty,
    Failed,
    Cards(Vec<TaskCard>),
}

impl TaskList {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        if tasks.is_empty() {
            TaskList::Empty
        } else {
            TaskList::Cards(tasks.iter().map(TaskCard::from).collect())
        }
    }

    pub fn cards(&self) -> &[TaskCard] {
        match self {
            TaskList::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            TaskList::Loading => Some(LOADING_PLACEHOLDER),
            TaskList::Empty => Some(EMPTY_PLACEHOLDER),
            TaskList::Failed => Some(FAILED_PLACEHOLDER),
            TaskList::Cards(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueLabel {
    Date(NaiveDate),
    NoDeadline,
}

impl fmt::Display for DueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueLabel::Date(date) => write!(f, "📅 {}", date.format("%Y-%m-%d")),
            DueLabel::NoDeadline => f.write_str(NO_DEADLINE),
        }
    }
}

/// One rendered task. Text fields hold the raw user input; renderers are
/// responsible for escaping it for their medium.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub due: DueLabel,
}

impl From<&Task> for TaskCard {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: Some(task.description.clone()).filter(|d| !d.is_empty()),
            status: task.status,
            priority: task.priority,
            due: task.due_date.map_or(DueLabel::NoDeadline, DueLabel::Date),
        }
    }
}
