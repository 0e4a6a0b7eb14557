//! Bootstrap layer
//!
//! Everything that happens before the target API is contacted: making sure
//! a credential exists and clearing out state persisted by a previous run
//! of the service.

mod credential;
mod state;

pub use credential::CredentialStore;
pub use state::reset_state;

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing the credential or the state directory
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read env file {}: {source}", .path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}
