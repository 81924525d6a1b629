use chrono::NaiveDate;
use thiserror::Error;

use crate::model::task::{due_date, Priority, Status, Task, TaskId, TaskPayload};

/// Client-side validation failures. These block a submission before any
/// request is made and are shown next to the offending field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),
    #[error("Choose a {0}")]
    UnknownChoice(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Description,
    Status,
    Priority,
    DueDate,
}

impl Field {
    pub const ORDER: [Field; 5] = [
        Field::Title,
        Field::Description,
        Field::Status,
        Field::Priority,
        Field::DueDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Status => "Status",
            Field::Priority => "Priority",
            Field::DueDate => "Due date",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Field::Title | Field::Description | Field::DueDate)
    }

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// The editable fields of the task form.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskForm {
    pub id: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: String,
}

impl TaskForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    /// Overwrites every field with the values of `task`.
    pub fn populate(&mut self, task: &Task) {
        self.id = Some(task.id);
        self.title = task.title.clone();
        self.description = task.description.clone();
        self.status = task.status;
        self.priority = task.priority;
        self.due_date = task
            .due_date
            .map(|d| d.format(due_date::FORMAT).to_string())
            .unwrap_or_default();
    }

    pub fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Title => Some(&mut self.title),
            Field::Description => Some(&mut self.description),
            Field::DueDate => Some(&mut self.due_date),
            Field::Status | Field::Priority => None,
        }
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Title => Some(&self.title),
            Field::Description => Some(&self.description),
            Field::DueDate => Some(&self.due_date),
            Field::Status | Field::Priority => None,
        }
    }

    pub fn to_payload(&self) -> Result<TaskPayload, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }

        let due = self.due_date.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            let date = NaiveDate::parse_from_str(due, due_date::FORMAT)
                .map_err(|_| FormError::InvalidDueDate(due.to_string()))?;
            Some(date)
        };

        if self.status == Status::Unknown {
            return Err(FormError::UnknownChoice("status"));
        }
        if self.priority == Priority::Unknown {
            return Err(FormError::UnknownChoice("priority"));
        }

        Ok(TaskPayload {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            priority: self.priority,
            due_date,
        })
    }
}
