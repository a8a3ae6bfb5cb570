use crate::models::EndpointConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct EndpointConfigResponse {
    pub endpoint: String,
    pub label: String,
    pub hit: String,
}

impl From<EndpointConfig> for EndpointConfigResponse {
    fn from(record: EndpointConfig) -> Self {
        Self {
            endpoint: record.endpoint,
            label: record.label,
            hit: record.hit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub msg: String,
}

// camelCase field names preserved from the browser-facing wire format.
#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(rename = "imageName")]
    pub image_name: String,
    #[serde(rename = "imageData")]
    pub image_data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub upload_file: String,
}
