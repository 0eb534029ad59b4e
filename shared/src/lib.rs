//! Shared types and logic for the festival stock counting form
//!
//! This crate contains everything that does not touch the network: models,
//! count arithmetic, form validation and the remote script contract. It is
//! used by the native client and, through WASM, by the browser form.

pub mod contract;
pub mod counting;
pub mod fallback;
pub mod models;
pub mod types;
pub mod validation;

pub use contract::*;
pub use counting::*;
pub use fallback::*;
pub use models::*;
pub use types::*;
pub use validation::*;
