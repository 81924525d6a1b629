use crate::model::task::TaskId;

/// Whether the form is creating a new task or editing an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Creating,
    Editing { id: TaskId },
}

impl EditMode {
    pub fn editing_id(&self) -> Option<TaskId> {
        match self {
            EditMode::Creating => None,
            EditMode::Editing { id } => Some(*id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Editing { .. })
    }

    pub fn affordances(&self) -> Affordances {
        match self {
            EditMode::Creating => Affordances {
                heading: "Create new task",
                submit_label: "Create task",
                cancel_visible: false,
            },
            EditMode::Editing { .. } => Affordances {
                heading: "Edit task",
                submit_label: "Update task",
                cancel_visible: true,
            },
        }
    }
}

/// Form chrome that depends on the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub heading: &'static str,
    pub submit_label: &'static str,
    pub cancel_visible: bool,
}
