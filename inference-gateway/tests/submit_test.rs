mod common;

use axum::http::StatusCode;
use common::{TestApp, endpoint_record, generation_request};
use inference_gateway::models::JobId;
use inference_gateway::services::{InferenceClient, LocalInference, SubmissionAck};
use service_core::error::AppError;
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn submit_with_header_override_returns_task_id() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/async_handler"))
        .header("x-sm-endpoint", "ep-override")
        .json(&generation_request())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::OK, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let task_id: JobId = body["task_id"]
        .as_str()
        .expect("task_id missing")
        .parse()
        .expect("task_id is not well-formed");

    // The request body was staged verbatim under the task id.
    let staged = app
        .storage
        .get(&app.config.storage.input_key(task_id))
        .await
        .unwrap()
        .expect("input object not staged");
    let staged: serde_json::Value = serde_json::from_slice(&staged).unwrap();
    assert_eq!(staged["prompt"], "cat");
    assert_eq!(staged["steps"], 20);

    // Before the backend writes anything, the task polls as pending.
    let poll: serde_json::Value = client
        .get(app.url(&format!("/task/{}", task_id)))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(poll["status"], "pending");

    app.cleanup().await;
}

#[tokio::test]
async fn submit_without_configured_endpoint_fails() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let response = client
        .post(app.url("/async_handler"))
        .json(&generation_request())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::NOT_FOUND, response.status());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "no inference endpoint configured");

    app.cleanup().await;
}

/// Records which endpoint each submission went to, delegating the ack shape
/// to the local client.
struct RecordingInference {
    inner: LocalInference,
    endpoints: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl InferenceClient for RecordingInference {
    async fn submit(
        &self,
        endpoint: &str,
        input_location: &str,
        job_id: JobId,
    ) -> Result<SubmissionAck, AppError> {
        self.endpoints.lock().unwrap().push(endpoint.to_string());
        self.inner.submit(endpoint, input_location, job_id).await
    }
}

#[tokio::test]
async fn submit_resolves_first_endpoint_in_sort_order() {
    let config = TestApp::test_config();
    let endpoints = Arc::new(Mutex::new(Vec::new()));
    let inference = Arc::new(RecordingInference {
        inner: LocalInference::new(
            config.storage.bucket.clone(),
            config.storage.prefix.clone(),
        ),
        endpoints: endpoints.clone(),
    });

    let app = TestApp::spawn_with_services(
        config,
        vec![
            endpoint_record("ep-b", "second"),
            endpoint_record("ep-a", "first"),
        ],
        inference,
    )
    .await;

    let response = reqwest::Client::new()
        .post(app.url("/async_handler"))
        .json(&generation_request())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::OK, response.status());
    assert_eq!(*endpoints.lock().unwrap(), vec!["ep-a".to_string()]);

    app.cleanup().await;
}

/// Backend rejections must reach the caller instead of dissolving into a
/// fake success.
struct RejectingInference;

#[async_trait::async_trait]
impl InferenceClient for RejectingInference {
    async fn submit(
        &self,
        _endpoint: &str,
        _input_location: &str,
        _job_id: JobId,
    ) -> Result<SubmissionAck, AppError> {
        Err(AppError::BadGateway("endpoint is scaling down".to_string()))
    }
}

#[tokio::test]
async fn submit_propagates_backend_rejection() {
    let app = TestApp::spawn_with_services(
        TestApp::test_config(),
        vec![endpoint_record("ep-a", "only")],
        Arc::new(RejectingInference),
    )
    .await;

    let response = reqwest::Client::new()
        .post(app.url("/async_handler"))
        .json(&generation_request())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::BAD_GATEWAY, response.status());

    app.cleanup().await;
}

#[tokio::test]
async fn submit_rejects_invalid_parameters() {
    let app = TestApp::spawn().await;

    let mut request = generation_request();
    request["steps"] = serde_json::json!(0);

    let response = reqwest::Client::new()
        .post(app.url("/async_handler"))
        .header("x-sm-endpoint", "ep-a")
        .json(&request)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, response.status());

    app.cleanup().await;
}
