pub mod error;
pub mod http;

use async_trait::async_trait;

use crate::model::task::{Task, TaskId, TaskPayload};

pub use error::{ApiError, Result};
pub use http::{HttpConfig, HttpTaskApi};

/// The remote task service. Implementations own transport details; the
/// client only sees typed tasks and [`ApiError`]s.
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>>;
    async fn get(&self, id: TaskId) -> Result<Task>;
    async fn create(&self, payload: &TaskPayload) -> Result<Task>;
    /// Full replace of the editable fields of `id`.
    async fn update(&self, id: TaskId, payload: &TaskPayload) -> Result<()>;
    async fn delete(&self, id: TaskId) -> Result<()>;
    async fn health(&self) -> Result<()>;
}
