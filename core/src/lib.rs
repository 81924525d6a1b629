pub mod api;
pub mod client;
pub mod input;
pub mod model;
pub mod render;
pub mod time;

pub use api::{ApiError, HttpConfig, HttpTaskApi, TaskApi};
pub use client::{Confirm, DeleteOutcome, Messages, SubmitOutcome, TaskClient, TaskList};
pub use model::edit::{Affordances, EditMode};
pub use model::form::{Field, FormError, TaskForm};
pub use model::task::{Priority, Status, Task, TaskId, TaskPayload};
pub use time::parse_due_date;
pub use input::{apply_to_form, parse_args, ParsedInput};
