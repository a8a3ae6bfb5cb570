use crate::models::{JobId, TaskStatus};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Generation parameters accepted by the submission endpoint. The body is
/// staged in the blob store verbatim for the inference backend to consume.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerationRequest {
    #[validate(length(min = 1, message = "Prompt is required"))]
    pub prompt: String,

    #[serde(default)]
    pub negative_prompt: Option<String>,

    #[validate(range(min = 1, max = 150, message = "Steps must be between 1 and 150"))]
    pub steps: u32,

    #[validate(length(min = 1, message = "Sampler is required"))]
    pub sampler: String,

    pub seed: i64,

    #[validate(range(min = 1, message = "Height must be positive"))]
    pub height: u32,

    #[validate(range(min = 1, message = "Width must be positive"))]
    pub width: u32,

    #[validate(range(min = 1, max = 16, message = "Count must be between 1 and 16"))]
    pub count: u32,

    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub task_id: JobId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskStatusResponse {
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

/// Operator-contact message for unreadable result objects. Deliberately
/// generic: parse diagnostics never reach the caller.
pub const RESULT_UNREADABLE_MSG: &str = "have other issue, please contact site admin";

impl TaskStatusResponse {
    pub fn pending() -> Self {
        Self {
            status: TaskStatus::Pending,
            images: None,
            msg: None,
        }
    }

    pub fn completed(images: Vec<String>) -> Self {
        Self {
            status: TaskStatus::Completed,
            images: Some(images),
            msg: None,
        }
    }

    pub fn failed() -> Self {
        Self {
            status: TaskStatus::Failed,
            images: None,
            msg: Some(RESULT_UNREADABLE_MSG.to_string()),
        }
    }
}
