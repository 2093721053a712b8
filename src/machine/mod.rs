//! Stateful shell around the pure core.
//!
//! [`TransitionManager`] owns the current [`StateContext`] and replaces it on
//! every accepted transition. Moves happen through the [`TransitionHandler`]s
//! of the current context, one per outgoing edge.

mod context;
mod manager;

pub use context::{StateContext, TransitionHandler, TransitionTable};
pub use manager::TransitionManager;
