//! Build errors for transition managers.

use thiserror::Error;

/// Errors that can occur when building a transition manager.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("initial vertex {initial} does not exist in the graph")]
    MissingInitialVertex { initial: String },
}
