pub mod error;
pub mod model;

pub use error::AppError;
pub use model::{OutputFormat, ProcessedFile, StatusKind, StatusMessage, ThemePreference};
