pub mod auth;
pub mod config;
pub mod health;
pub mod tasks;
pub mod upload;

pub use auth::authenticate;
pub use config::list_config;
pub use health::{greeting, health_check};
pub use tasks::{get_task, submit_task};
pub use upload::upload_image;
