use crate::dtos::{UploadRequest, UploadResponse};
use crate::startup::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use service_core::error::AppError;
use uuid::Uuid;

/// Stored image flavor, classified from the client-supplied file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
}

impl ImageKind {
    /// Substring match on the name; anything that is not recognizably JPEG
    /// is stored as PNG.
    pub fn classify(name: &str) -> Self {
        if name.contains("jpg") || name.contains("jpeg") {
            ImageKind::Jpeg
        } else {
            ImageKind::Png
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "image/jpeg",
            ImageKind::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Jpeg => "jpg",
            ImageKind::Png => "png",
        }
    }
}

pub async fn upload_image(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let data = STANDARD.decode(request.image_data.as_bytes()).map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("image data is not valid base64: {}", e))
    })?;

    let kind = ImageKind::classify(&request.image_name);
    let key = state
        .config
        .storage
        .upload_key(&Uuid::new_v4().to_string(), kind.extension());

    tracing::info!(
        key = %key,
        content_type = %kind.content_type(),
        size = data.len(),
        "storing uploaded image"
    );

    state.storage.put(&key, data, kind.content_type()).await?;

    Ok(Json(UploadResponse { upload_file: key }))
}
