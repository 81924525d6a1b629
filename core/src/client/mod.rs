pub mod messages;
pub mod view;

use tracing::{debug, warn};

use crate::api::{ApiError, TaskApi};
use crate::model::edit::{Affordances, EditMode};
use crate::model::form::{FormError, TaskForm};
use crate::model::task::{Task, TaskId};

pub use messages::{Flash, MessageKind, Messages};
pub use view::{DueLabel, TaskCard, TaskList};

pub const TASK_CREATED: &str = "Task created";
pub const TASK_UPDATED: &str = "Task updated";
pub const TASK_DELETED: &str = "Task deleted";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// A yes/no answer obtained before a destructive action is dispatched.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Client-side validation stopped the submission; nothing was sent.
    Blocked(FormError),
    Created(Task),
    Updated(TaskId),
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Failed,
}

/// Keeps the form, edit mode, list region and message regions in sync
/// with the task API.
///
/// Every operation takes `&mut self`, so requests never overlap: a caller
/// cannot start a second action until the first one (including its reload)
/// has finished. Failures never escape; they end up in [`Messages`].
pub struct TaskClient<A: TaskApi> {
    api: A,
    mode: EditMode,
    form: TaskForm,
    form_error: Option<FormError>,
    list: TaskList,
    messages: Messages,
}

impl<A: TaskApi> TaskClient<A> {
    pub fn new(api: A) -> Self {
        Self::with_messages(api, Messages::default())
    }

    pub fn with_messages(api: A, messages: Messages) -> Self {
        Self {
            api,
            mode: EditMode::Creating,
            form: TaskForm::default(),
            form_error: None,
            list: TaskList::Loading,
            messages,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn affordances(&self) -> Affordances {
        self.mode.affordances()
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    /// Inline validation feedback from the last blocked submit.
    pub fn form_error(&self) -> Option<&FormError> {
        self.form_error.as_ref()
    }

    pub fn list(&self) -> &TaskList {
        &self.list
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut Messages {
        &mut self.messages
    }

    pub async fn load_tasks(&mut self) {
        match self.api.list().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "tasks loaded");
                self.list = TaskList::from_tasks(&tasks);
            }
            Err(err) => {
                warn!(error = %err, "loading tasks failed");
                self.messages.show_error(format!("Could not load tasks: {}", err));
                self.list = TaskList::Failed;
            }
        }
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let payload = match self.form.to_payload() {
            Ok(payload) => payload,
            Err(err) => {
                self.form_error = Some(err.clone());
                return SubmitOutcome::Blocked(err);
            }
        };
        self.form_error = None;

        let result = match self.mode {
            EditMode::Editing { id } => self
                .api
                .update(id, &payload)
                .await
                .map(|()| SubmitOutcome::Updated(id)),
            EditMode::Creating => self.api.create(&payload).await.map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                let text = match outcome {
                    SubmitOutcome::Updated(_) => TASK_UPDATED,
                    _ => TASK_CREATED,
                };
                self.messages.show_success(text);
                self.reset_form();
                self.load_tasks().await;
                outcome
            }
            Err(err) => {
                warn!(error = %err, mode = ?self.mode, "submit failed");
                self.messages.show_error(submit_error_text(&err));
                SubmitOutcome::Failed
            }
        }
    }

    /// Loads `id` into the form. Returns whether edit mode was entered.
    pub async fn begin_edit(&mut self, id: TaskId) -> bool {
        match self.api.get(id).await {
            Ok(task) => {
                self.form.populate(&task);
                self.form_error = None;
                self.mode = EditMode::Editing { id };
                true
            }
            Err(err) => {
                warn!(id, error = %err, "loading task for edit failed");
                self.messages.show_error(format!("Could not load task: {}", err));
                false
            }
        }
    }

    pub async fn delete_task(&mut self, id: TaskId, confirm: &mut impl Confirm) -> DeleteOutcome {
        if !confirm.confirm(DELETE_PROMPT) {
            debug!(id, "delete declined");
            return DeleteOutcome::Declined;
        }

        match self.api.delete(id).await {
            Ok(()) => {
                self.messages.show_success(TASK_DELETED);
                self.load_tasks().await;
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(id, error = %err, "delete failed");
                self.messages.show_error(format!("Could not delete task: {}", err));
                DeleteOutcome::Failed
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    fn reset_form(&mut self) {
        self.mode = EditMode::Creating;
        self.form.clear();
        self.form_error = None;
    }
}

/// Validation messages from the server are shown as-is; anything else gets
/// a generic prefix with the failure detail.
fn submit_error_text(err: &ApiError) -> String {
    match err.validation_errors() {
        Some(errors) => errors.join(", "),
        None => format!("Error: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Result;
    use crate::model::task::{Priority, Status, TaskPayload};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Get(TaskId),
        Create(TaskPayload),
        Update(TaskId, TaskPayload),
        Delete(TaskId),
    }

    #[derive(Clone, Copy)]
    enum Failure {
        Rejected(&'static [&'static str]),
        Status(u16),
    }

    impl Failure {
        fn to_error(self) -> ApiError {
            match self {
                Failure::Rejected(errors) => ApiError::Rejected {
                    status: StatusCode::BAD_REQUEST,
                    errors: errors.iter().map(|e| e.to_string()).collect(),
                },
                Failure::Status(code) => ApiError::Status {
                    status: StatusCode::from_u16(code).unwrap(),
                    detail: None,
                },
            }
        }
    }

    #[derive(Default)]
    struct MockApi {
        tasks: Mutex<Vec<Task>>,
        calls: Mutex<Vec<Call>>,
        fail_list: Option<Failure>,
        fail_write: Option<Failure>,
    }

    impl MockApi {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            Self {
                tasks: Mutex::new(tasks),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl TaskApi for MockApi {
        async fn list(&self) -> Result<Vec<Task>> {
            self.record(Call::List);
            match self.fail_list {
                Some(failure) => Err(failure.to_error()),
                None => Ok(self.tasks.lock().unwrap().clone()),
            }
        }

        async fn get(&self, id: TaskId) -> Result<Task> {
            self.record(Call::Get(id));
            self.tasks
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| Failure::Status(404).to_error())
        }

        async fn create(&self, payload: &TaskPayload) -> Result<Task> {
            self.record(Call::Create(payload.clone()));
            if let Some(failure) = self.fail_write {
                return Err(failure.to_error());
            }
            let mut tasks = self.tasks.lock().unwrap();
            let id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let task = Task {
                id,
                title: payload.title.clone(),
                description: payload.description.clone(),
                status: payload.status,
                priority: payload.priority,
                due_date: payload.due_date,
            };
            tasks.push(task.clone());
            Ok(task)
        }

        async fn update(&self, id: TaskId, payload: &TaskPayload) -> Result<()> {
            self.record(Call::Update(id, payload.clone()));
            if let Some(failure) = self.fail_write {
                return Err(failure.to_error());
            }
            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| Failure::Status(404).to_error())?;
            task.title = payload.title.clone();
            task.description = payload.description.clone();
            task.status = payload.status;
            task.priority = payload.priority;
            task.due_date = payload.due_date;
            Ok(())
        }

        async fn delete(&self, id: TaskId) -> Result<()> {
            self.record(Call::Delete(id));
            if let Some(failure) = self.fail_write {
                return Err(failure.to_error());
            }
            let mut tasks = self.tasks.lock().unwrap();
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(Failure::Status(404).to_error());
            }
            Ok(())
        }

        async fn health(&self) -> Result<()> {
            Ok(())
        }
    }

    fn task(id: TaskId, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: "desc".to_string(),
            status: Status::InProgress,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 12, 20),
        }
    }

    fn fill_buy_milk(client: &mut TaskClient<MockApi>) {
        let form = client.form_mut();
        form.title = "Buy milk".to_string();
        form.status = Status::Pending;
        form.priority = Priority::Low;
    }

    #[tokio::test]
    async fn test_create_resets_form_and_reloads() {
        let mut client = TaskClient::new(MockApi::default());
        fill_buy_milk(&mut client);

        let outcome = client.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Created(ref t) if t.title == "Buy milk"));
        assert_eq!(client.messages().success(), Some(TASK_CREATED));
        assert_eq!(client.mode(), EditMode::Creating);
        assert!(client.form().is_clear());
        assert_eq!(client.list().cards().len(), 1);

        let calls = client.api().calls();
        assert!(matches!(
            calls[0],
            Call::Create(ref p) if p.title == "Buy milk" && p.priority == Priority::Low
        ));
        assert_eq!(calls[1], Call::List);
    }

    #[tokio::test]
    async fn test_update_targets_editing_id() {
        let mut client = TaskClient::new(MockApi::with_tasks(vec![task(1, "a"), task(42, "X")]));
        assert!(client.begin_edit(42).await);
        client.form_mut().title = "Renamed".to_string();

        let outcome = client.submit().await;

        assert_eq!(outcome, SubmitOutcome::Updated(42));
        assert_eq!(client.messages().success(), Some(TASK_UPDATED));
        assert_eq!(client.mode(), EditMode::Creating);
        assert!(client.form().is_clear());

        let calls = client.api().calls();
        assert!(matches!(calls[1], Call::Update(42, ref p) if p.title == "Renamed"));
        assert_eq!(calls.last(), Some(&Call::List));
    }

    #[tokio::test]
    async fn test_begin_edit_populates_form() {
        let mut client = TaskClient::new(MockApi::with_tasks(vec![task(42, "X")]));

        assert!(client.begin_edit(42).await);

        assert_eq!(client.mode(), EditMode::Editing { id: 42 });
        let form = client.form();
        assert_eq!(form.id, Some(42));
        assert_eq!(form.title, "X");
        assert_eq!(form.description, "desc");
        assert_eq!(form.status, Status::InProgress);
        assert_eq!(form.priority, Priority::High);
        assert_eq!(form.due_date, "2025-12-20");

        let affordances = client.affordances();
        assert!(affordances.cancel_visible);
        assert_eq!(affordances.submit_label, "Update task");
        assert_eq!(affordances.heading, "Edit task");
    }

    #[tokio::test]
    async fn test_begin_edit_replaces_previous_edit() {
        let mut client = TaskClient::new(MockApi::with_tasks(vec![task(1, "one"), task(2, "two")]));
        client.begin_edit(1).await;
        client.begin_edit(2).await;

        assert_eq!(client.mode(), EditMode::Editing { id: 2 });
        assert_eq!(client.form().title, "two");
    }

    #[tokio::test]
    async fn test_begin_edit_failure_keeps_state() {
        let mut client = TaskClient::new(MockApi::with_tasks(vec![task(1, "one")]));
        client.begin_edit(1).await;
        client.form_mut().title = "half typed".to_string();

        assert!(!client.begin_edit(99).await);

        assert_eq!(client.mode(), EditMode::Editing { id: 1 });
        assert_eq!(client.form().title, "half typed");
        assert!(client.messages().error().unwrap().starts_with("Could not load task: "));
    }

    #[tokio::test]
    async fn test_blank_title_makes_no_request() {
        let mut client = TaskClient::new(MockApi::default());
        client.form_mut().description = "no title".to_string();

        let outcome = client.submit().await;

        assert_eq!(outcome, SubmitOutcome::Blocked(FormError::MissingTitle));
        assert_eq!(client.form_error(), Some(&FormError::MissingTitle));
        assert!(client.api().calls().is_empty());
        assert!(client.messages().current().is_none());
        assert_eq!(client.form().description, "no title");
    }

    #[tokio::test]
    async fn test_server_validation_error_is_verbatim() {
        let api = MockApi {
            fail_write: Some(Failure::Rejected(&["title required"])),
            ..MockApi::default()
        };
        let mut client = TaskClient::new(api);
        fill_buy_milk(&mut client);

        assert_eq!(client.submit().await, SubmitOutcome::Failed);

        assert_eq!(client.messages().error(), Some("title required"));
        assert_eq!(client.form().title, "Buy milk");
        assert_eq!(client.form().priority, Priority::Low);
        // No reload after a failed write.
        assert_eq!(client.api().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_server_errors_are_joined() {
        let api = MockApi {
            fail_write: Some(Failure::Rejected(&["Title is required", "Priority is invalid"])),
            ..MockApi::default()
        };
        let mut client = TaskClient::new(api);
        fill_buy_milk(&mut client);
        client.submit().await;

        assert_eq!(
            client.messages().error(),
            Some("Title is required, Priority is invalid")
        );
    }

    #[tokio::test]
    async fn test_failed_update_stays_in_edit_mode() {
        let api = MockApi {
            fail_write: Some(Failure::Status(500)),
            ..MockApi::with_tasks(vec![task(5, "five")])
        };
        let mut client = TaskClient::new(api);
        client.begin_edit(5).await;

        assert_eq!(client.submit().await, SubmitOutcome::Failed);
        assert_eq!(client.mode(), EditMode::Editing { id: 5 });
        assert_eq!(
            client.messages().error(),
            Some("Error: request failed with status 500")
        );
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let mut client = TaskClient::new(MockApi::with_tasks(vec![task(7, "seven")]));
        let mut asked = None;

        let outcome = client
            .delete_task(7, &mut |prompt: &str| {
                asked = Some(prompt.to_string());
                false
            })
            .await;

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(asked.as_deref(), Some(DELETE_PROMPT));
        assert!(client.api().calls().is_empty());
        assert!(client.messages().current().is_none());
    }

    #[tokio::test]
    async fn test_confirmed_delete_reloads() {
        let api = MockApi::with_tasks(vec![task(7, "seven"), task(8, "eight")]);
        let mut client = TaskClient::new(api);

        let outcome = client.delete_task(7, &mut |_: &str| true).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(client.messages().success(), Some(TASK_DELETED));
        assert_eq!(client.api().calls(), vec![Call::Delete(7), Call::List]);
        let ids: Vec<TaskId> = client.list().cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![8]);
    }

    #[tokio::test]
    async fn test_delete_of_missing_task_reports_error() {
        let mut client = TaskClient::new(MockApi::default());

        let outcome = client.delete_task(3, &mut |_: &str| true).await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert!(client.messages().error().unwrap().starts_with("Could not delete task: "));
        assert_eq!(client.api().calls(), vec![Call::Delete(3)]);
    }

    #[tokio::test]
    async fn test_cancel_edit_is_idempotent() {
        let mut client = TaskClient::new(MockApi::with_tasks(vec![task(1, "one")]));
        client.begin_edit(1).await;

        client.cancel_edit();
        let once = (client.mode(), client.form().clone());
        client.cancel_edit();

        assert_eq!((client.mode(), client.form().clone()), once);
        assert_eq!(client.mode(), EditMode::Creating);
        assert!(client.form().is_clear());
        assert!(!client.affordances().cancel_visible);
    }

    #[tokio::test]
    async fn test_empty_list_shows_placeholder() {
        let mut client = TaskClient::new(MockApi::default());
        client.load_tasks().await;

        assert_eq!(client.list(), &TaskList::Empty);
        assert!(client.list().cards().is_empty());
    }

    #[tokio::test]
    async fn test_list_failure_shows_failed_placeholder() {
        let api = MockApi {
            fail_list: Some(Failure::Status(500)),
            ..MockApi::with_tasks(vec![task(1, "one")])
        };
        let mut client = TaskClient::new(api);
        client.load_tasks().await;

        assert_eq!(client.list(), &TaskList::Failed);
        assert!(client.list().cards().is_empty());
        assert_eq!(
            client.messages().error(),
            Some("Could not load tasks: request failed with status 500")
        );
    }
}
