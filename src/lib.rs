//! Statepath: a graph-driven finite state machine runtime
//!
//! A directed graph of vertices describes which state changes are legal. The
//! runtime walks the graph to discover edges and runs a controller that only
//! lets the machine move along those edges, rejecting anything else with a
//! descriptive error.
//!
//! # Core Concepts
//!
//! - **Graph**: insertion-ordered mapping from vertex id to an opaque payload
//! - **Accessor**: reads id, state and outgoing edges from a payload
//! - **Traversal**: lazy depth-first discovery of edges, cycle safe
//! - **Validation**: ordered checks deciding whether a move is legal
//! - **Transition Manager**: live machine exposing one handler per edge
//!
//! # Example
//!
//! ```rust
//! use statepath::core::VertexFields;
//! use statepath::events::{Channel, EventLog};
//! use statepath::graph;
//! use statepath::machine::TransitionManager;
//! use std::rc::Rc;
//!
//! let graph = graph! {
//!     "Start" => "starting"; ["Mid"],
//!     "Mid" => "working"; ["End"],
//!     "End" => "done"; [],
//! };
//! let log = Rc::new(EventLog::new());
//!
//! let manager: TransitionManager<_, _, &str> =
//!     TransitionManager::builder(graph, VertexFields::new("Start"))
//!         .notifier(Rc::clone(&log))
//!         .build()
//!         .unwrap();
//!
//! manager.transition(&"Mid", "go").unwrap();
//! assert_eq!(manager.state_context().state, "working");
//!
//! // Not an edge of "Mid": rejected, state unchanged, error announced.
//! assert!(manager.transition(&"Start", "back").is_err());
//! assert_eq!(manager.current(), "Mid");
//! assert_eq!(log.on(Channel::Error).len(), 1);
//! ```

pub mod builder;
pub mod core;
pub mod events;
pub mod machine;

// Re-export commonly used types
pub use self::builder::{BuildError, TransitionManagerBuilder};
pub use self::core::{
    traverse, validate_transition, Graph, MachineAccessor, TransitionError, Vertex,
    VertexAccessor, VertexFields,
};
pub use self::events::{Channel, EventDispatcher, MachineEvent, Notifier};
pub use self::machine::{StateContext, TransitionManager};
