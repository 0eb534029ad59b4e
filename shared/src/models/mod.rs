//! Domain models for the stock counting form

mod app_config;
mod location;
mod product;
mod staff;
mod submission;

pub use app_config::*;
pub use location::*;
pub use product::*;
pub use staff::*;
pub use submission::*;
