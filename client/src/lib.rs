//! Native client for the festival stock counting form
//!
//! Loads the event configuration from the sheet script (falling back to
//! built-in data), and posts stocktakes and transfers back to it.

pub mod config;
pub mod error;
pub mod external;
pub mod services;
pub mod session;
pub mod telemetry;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use external::{connect, DemoScriptClient, HttpScriptClient, ScriptTransport};
pub use services::{ConfigLoader, SubmissionService};
pub use session::{AppSession, SubmitOutcome};
pub use telemetry::init_tracing;
