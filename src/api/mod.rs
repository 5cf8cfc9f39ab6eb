pub mod client;
pub mod models;

pub use client::{ApiError, ProcessClient, Result};
pub use models::{ApiConfig, ProcessRequest};
