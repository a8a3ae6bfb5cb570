use crate::dtos::EndpointConfigResponse;
use crate::startup::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use service_core::error::AppError;

pub async fn list_config(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let records = state.endpoints.query(None).await?;
    let configs: Vec<EndpointConfigResponse> = records.into_iter().map(Into::into).collect();
    Ok(Json(configs))
}
