//! Shared fixtures for the HTTP contract tests.

use serde_json::{json, Value};
use taskdesk_core::{HttpTaskApi, TaskClient};
use wiremock::MockServer;

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn client_for(server: &MockServer) -> TaskClient<HttpTaskApi> {
    let api = HttpTaskApi::new(&server.uri()).expect("mock server uri should parse");
    TaskClient::new(api)
}

pub fn task_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "",
        "status": "pending",
        "priority": "medium",
        "dueDate": null
    })
}
