pub mod endpoints;
pub mod inference;
pub mod storage;

pub use endpoints::{DynamoEndpointStore, EndpointStore, MemoryEndpointStore};
pub use inference::{InferenceClient, LocalInference, SageMakerInference, SubmissionAck};
pub use storage::{LocalStorage, S3Storage, Storage};
