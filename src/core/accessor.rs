//! Accessor capability translating opaque vertex payloads.
//!
//! The runtime never looks inside a vertex payload. An accessor extracts the
//! vertex id, the semantic state carried by the vertex and its outgoing edges.

use super::graph::VertexId;
use serde::{Deserialize, Serialize};

/// Reads identifier, state and outgoing edges from a vertex payload.
///
/// # Example
///
/// ```rust
/// use statepath::core::{traverse, Graph, VertexAccessor};
///
/// struct Step {
///     name: &'static str,
///     next: Vec<&'static str>,
/// }
///
/// struct StepAccessor;
///
/// impl VertexAccessor<Step> for StepAccessor {
///     type Id = &'static str;
///     type State = usize;
///
///     fn id(&self, vertex: &Step) -> &'static str {
///         vertex.name
///     }
///
///     fn state(&self, vertex: &Step) -> usize {
///         vertex.name.len()
///     }
///
///     fn edges(&self, vertex: &Step) -> Vec<&'static str> {
///         vertex.next.clone()
///     }
/// }
///
/// let mut graph = Graph::new();
/// graph.insert("one", Step { name: "one", next: vec!["two"] });
/// graph.insert("two", Step { name: "two", next: vec![] });
///
/// let edges: Vec<_> = traverse(&graph, &StepAccessor).collect();
/// assert_eq!(edges, vec![("one", "two")]);
/// ```
pub trait VertexAccessor<V> {
    type Id: VertexId;
    type State;

    /// Id of the vertex. Must equal the key the vertex is stored under.
    fn id(&self, vertex: &V) -> Self::Id;

    /// Semantic state of being "in" this vertex.
    fn state(&self, vertex: &V) -> Self::State;

    /// Outgoing edge targets, in discovery order.
    fn edges(&self, vertex: &V) -> Vec<Self::Id>;
}

/// Accessor that also knows where a machine starts.
pub trait MachineAccessor<V>: VertexAccessor<V> {
    /// Id of the vertex a new machine starts in.
    fn initial(&self) -> Self::Id;
}

/// Stock vertex shape with the id, state and edge list stored inline.
///
/// # Example
///
/// ```rust
/// use statepath::core::{Vertex, VertexAccessor, VertexFields};
///
/// let door = Vertex::new("Open", true, vec!["Closed"]);
/// let fields = VertexFields::new("Open");
///
/// assert_eq!(fields.id(&door), "Open");
/// assert!(fields.state(&door));
/// assert_eq!(fields.edges(&door), vec!["Closed"]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vertex<Id, S> {
    pub id: Id,
    /// State of being in this vertex
    pub state: S,
    /// Outgoing edge targets
    pub edges: Vec<Id>,
}

impl<Id, S> Vertex<Id, S> {
    /// Create a vertex stored under `id`.
    pub fn new(id: Id, state: S, edges: Vec<Id>) -> Self {
        Self { id, state, edges }
    }
}

/// Accessor for [`Vertex`] payloads, starting at `initial`.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexFields<Id> {
    initial: Id,
}

impl<Id> VertexFields<Id> {
    /// Accessor for machines starting in `initial`.
    pub fn new(initial: Id) -> Self {
        Self { initial }
    }
}

impl<Id: VertexId, S: Clone> VertexAccessor<Vertex<Id, S>> for VertexFields<Id> {
    type Id = Id;
    type State = S;

    fn id(&self, vertex: &Vertex<Id, S>) -> Id {
        vertex.id.clone()
    }

    fn state(&self, vertex: &Vertex<Id, S>) -> S {
        vertex.state.clone()
    }

    fn edges(&self, vertex: &Vertex<Id, S>) -> Vec<Id> {
        vertex.edges.clone()
    }
}

impl<Id: VertexId, S: Clone> MachineAccessor<Vertex<Id, S>> for VertexFields<Id> {
    fn initial(&self) -> Id {
        self.initial.clone()
    }
}
