//! Adapters between the form and the script endpoint

pub mod config_loader;
pub mod submission;

pub use config_loader::ConfigLoader;
pub use submission::SubmissionService;
