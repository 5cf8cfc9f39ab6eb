pub mod download_coordinator;
pub mod form_controller;

pub use download_coordinator::{DownloadCoordinator, SaveEvent};
pub use form_controller::{FormController, Submission};
