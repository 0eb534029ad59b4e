//! The remote sheet-script contract
//!
//! The script endpoint has changed shape several times: flat arrays, then a
//! `{status, data}` envelope, with field renames along the way. Everything that
//! knows about those shapes lives here, so callers only ever see [`AppConfig`]
//! on the way in and a [`Submission`] on the way out.
//!
//! [`AppConfig`]: crate::models::AppConfig
//! [`Submission`]: crate::models::Submission

mod document;
mod normalize;
mod vocabulary;

pub use document::*;
pub use normalize::*;
pub use vocabulary::*;
