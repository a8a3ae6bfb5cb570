use crate::dtos::{GenerationRequest, SubmitResponse, TaskStatusResponse};
use crate::models::{JobId, ResultDocument};
use crate::startup::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};
use service_core::error::AppError;
use validator::Validate;

/// Header carrying a request-scoped endpoint override.
pub const ENDPOINT_OVERRIDE_HEADER: &str = "x-sm-endpoint";

pub async fn submit_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerationRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let endpoint = match headers.get(ENDPOINT_OVERRIDE_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| {
                AppError::BadRequest(anyhow::anyhow!("endpoint override header is not valid text"))
            })?
            .to_string(),
        None => state
            .endpoints
            .query(None)
            .await?
            .into_iter()
            .next()
            .map(|record| record.endpoint)
            .ok_or_else(|| {
                AppError::NotFound(anyhow::anyhow!("no inference endpoint configured"))
            })?,
    };

    let job_id = JobId::new();
    let body = serde_json::to_vec(&request)
        .map_err(|e| AppError::InternalError(anyhow::anyhow!("failed to serialize request: {}", e)))?;

    let input_key = state.config.storage.input_key(job_id);
    state
        .storage
        .put(&input_key, body, "application/json")
        .await
        .map_err(|e| {
            tracing::error!(task_id = %job_id, key = %input_key, "failed to stage input: {}", e);
            e
        })?;

    let input_location = state.config.storage.object_uri(&input_key);
    tracing::info!(
        task_id = %job_id,
        endpoint = %endpoint,
        input_location = %input_location,
        "submitting generation job"
    );

    let ack = state
        .inference
        .submit(&endpoint, &input_location, job_id)
        .await?;

    // The caller polls by the id the backend will name the result object
    // after, so the returned task id comes from the acknowledged output
    // location rather than the locally generated id.
    let task_id = JobId::from_object_key(&ack.output_location).map_err(|e| {
        AppError::BadGateway(format!("backend returned an unusable output location: {}", e))
    })?;

    Ok(Json(SubmitResponse { task_id }))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let task_id: JobId = task_id
        .parse()
        .map_err(|e: crate::models::ParseJobIdError| AppError::BadRequest(anyhow::anyhow!(e)))?;

    let output_key = state.config.storage.output_key(task_id);
    let response = match state.storage.get(&output_key).await {
        Ok(None) => TaskStatusResponse::pending(),
        Ok(Some(bytes)) => match ResultDocument::parse(&bytes) {
            Ok(document) => TaskStatusResponse::completed(
                document.relative_images(&state.config.storage.uri_prefix()),
            ),
            Err(e) => {
                tracing::error!(task_id = %task_id, "result document is unreadable: {}", e);
                TaskStatusResponse::failed()
            }
        },
        Err(e) => {
            tracing::error!(task_id = %task_id, "failed to read result object: {}", e);
            TaskStatusResponse::failed()
        }
    };

    Ok(Json(response))
}
