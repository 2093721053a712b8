//! Transition errors.

use thiserror::Error;

/// Reasons a transition is rejected.
///
/// Ids are rendered with `Display` so the error stays independent of the
/// graph's id type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("current state is not defined")]
    UninitializedState,

    #[error("invalid transition attempt from {attempted}, current state is {current}")]
    StateMismatch { attempted: String, current: String },

    #[error("destination vertex {to} does not exist in the graph")]
    UnknownDestination { to: String },

    #[error("transition from {from} to {to} is not allowed")]
    IllegalTransition { from: String, to: String },

    #[error("reached a leaf node at {from}, no further transitions possible")]
    TerminalState { from: String },

    #[error("no transition to {to} is available from {from}")]
    NoSuchTransition { from: String, to: String },

    #[error("transition from {from} to {to} outlived its manager")]
    Detached { from: String, to: String },
}
