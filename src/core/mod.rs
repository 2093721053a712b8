//! Pure core of the runtime.
//!
//! - Graph model and the accessor capability
//! - Lazy depth-first edge discovery
//! - The transition guard
//! - Transition history
//!
//! Nothing in this module holds mutable machine state.

mod accessor;
mod error;
mod graph;
mod history;
mod traversal;
mod validate;

pub use accessor::{MachineAccessor, Vertex, VertexAccessor, VertexFields};
pub use error::TransitionError;
pub use graph::{Graph, VertexId};
pub use history::{TransitionHistory, TransitionRecord, DEFAULT_HISTORY_LIMIT};
pub use traversal::{traverse, Traversal};
pub use validate::validate_transition;
