pub mod gallery;
pub mod tasks;

pub use gallery::{
    AuthRequest, AuthResponse, EndpointConfigResponse, UploadRequest, UploadResponse,
};
pub use tasks::{GenerationRequest, SubmitResponse, TaskStatusResponse};
