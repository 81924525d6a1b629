use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::error::{ApiError, Result};
use crate::api::TaskApi;
use crate::model::task::{Task, TaskId, TaskPayload};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

const TASKS_PATH: &str = "api/tasks";
const HEALTH_PATH: &str = "health";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Error body shapes the API sends on non-2xx: `{"errors": [...]}` for
/// validation failures, `{"error": "..."}` otherwise.
#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    error: Option<String>,
}

/// [`TaskApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    http_client: Client,
    base_url: Url,
}

impl HttpTaskApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(HttpConfig {
            base_url: base_url.to_string(),
            ..HttpConfig::default()
        })
    }

    pub fn with_config(config: HttpConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let mut base_url = Url::parse(&config.base_url)?;
        // Url::join drops the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http_client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn tasks_url(&self) -> Result<Url> {
        Ok(self.base_url.join(TASKS_PATH)?)
    }

    fn task_url(&self, id: TaskId) -> Result<Url> {
        Ok(self.base_url.join(&format!("{}/{}", TASKS_PATH, id))?)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "task api request");
        self.http_client.request(method, url)
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
        warn!(status = status.as_u16(), body = %text, "task api returned an error");

        if body.errors.is_empty() {
            Err(ApiError::Status { status, detail: body.error })
        } else {
            Err(ApiError::Rejected { status, errors: body.errors })
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self) -> Result<Vec<Task>> {
        let url = self.tasks_url()?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn get(&self, id: TaskId) -> Result<Task> {
        let url = self.task_url(id)?;
        self.send_json(self.request(Method::GET, url)).await
    }

    async fn create(&self, payload: &TaskPayload) -> Result<Task> {
        let url = self.tasks_url()?;
        self.send_json(self.request(Method::POST, url).json(payload)).await
    }

    async fn update(&self, id: TaskId, payload: &TaskPayload) -> Result<()> {
        let url = self.task_url(id)?;
        self.send(self.request(Method::PUT, url).json(payload)).await?;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<()> {
        let url = self.task_url(id)?;
        self.send(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn health(&self) -> Result<()> {
        let url = self.base_url.join(HEALTH_PATH)?;
        self.send(self.request(Method::GET, url)).await?;
        Ok(())
    }
}
