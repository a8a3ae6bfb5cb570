use crate::dtos::{AuthRequest, AuthResponse};
use crate::startup::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use service_core::error::AppError;
use subtle::ConstantTimeEq;

pub async fn authenticate(
    State(state): State<AppState>,
    Json(request): Json<AuthRequest>,
) -> Result<impl IntoResponse, AppError> {
    let supplied = request.token.as_bytes();
    let expected = state.config.admin_token.as_bytes();

    // Constant time comparison
    let matches = supplied.len() == expected.len() && bool::from(supplied.ct_eq(expected));
    if !matches {
        return Err(AppError::Unauthorized(anyhow::anyhow!(
            "invalid admin token"
        )));
    }

    Ok(Json(AuthResponse {
        msg: "ok".to_string(),
    }))
}
