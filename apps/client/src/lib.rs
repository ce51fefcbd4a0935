//! Client session for a resume parsing and job matching service.
//!
//! [`session::SessionController`] owns the selected file, the busy flags and
//! the results, and drives the remote service through [`backend::ResumeBackend`].
//! Views observe it through snapshots and call its operations.

pub mod backend;
pub mod config;
pub mod errors;
pub mod models;
pub mod notice;
pub mod session;
pub mod templates;

pub use config::Config;
pub use errors::{BackendError, SessionError, ValidationError};
pub use session::{Lane, Phase, SessionController, SessionSnapshot};
