//! Builder API for configuring transition managers.
//!
//! This module provides the fluent [`TransitionManagerBuilder`] and the
//! [`graph!`](crate::graph) macro for writing graphs of stock
//! [`Vertex`](crate::core::Vertex) values with little boilerplate.

pub mod error;
pub mod macros;
pub mod manager;

pub use error::BuildError;
pub use manager::TransitionManagerBuilder;
