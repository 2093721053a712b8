//! Graph model: an insertion-ordered mapping from vertex id to vertex payload.
//!
//! The graph is passive data. Everything the runtime knows about a vertex
//! payload comes through a [`VertexAccessor`](super::VertexAccessor).

use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Identifier of a vertex.
///
/// Blanket-implemented for every type that is cloneable, hashable and
/// printable, which covers the usual string and integer ids.
pub trait VertexId: Clone + Eq + Hash + Debug + Display {}

impl<T> VertexId for T where T: Clone + Eq + Hash + Debug + Display {}

/// Mapping from vertex id to vertex payload.
///
/// Iteration follows insertion order. Traversal uses this order to pick its
/// roots, so two graphs with the same vertices inserted in a different order
/// may report different discovery edges.
///
/// # Example
///
/// ```rust
/// use statepath::core::{Graph, Vertex};
///
/// let mut graph = Graph::new();
/// graph.insert("Idle", Vertex::new("Idle", 0, vec!["Busy"]));
/// graph.insert("Busy", Vertex::new("Busy", 1, vec!["Idle"]));
///
/// assert_eq!(graph.len(), 2);
/// assert!(graph.contains(&"Busy"));
/// assert_eq!(graph.ids().copied().collect::<Vec<_>>(), vec!["Idle", "Busy"]);
/// ```
#[derive(Clone, Debug)]
pub struct Graph<Id, V> {
    order: Vec<Id>,
    vertices: HashMap<Id, V>,
}

impl<Id, V> Default for Graph<Id, V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            vertices: HashMap::new(),
        }
    }
}

impl<Id: VertexId, V> Graph<Id, V> {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a vertex under `id`.
    ///
    /// Replacing an existing vertex keeps its original position and returns
    /// the previous payload.
    pub fn insert(&mut self, id: Id, vertex: V) -> Option<V> {
        let previous = self.vertices.insert(id.clone(), vertex);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    /// Vertex stored under `id`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statepath::core::{Graph, Vertex};
    ///
    /// let mut graph = Graph::new();
    /// graph.insert(1u8, Vertex::new(1u8, "one", vec![]));
    ///
    /// assert_eq!(graph.get(&1).map(|vertex| vertex.state), Some("one"));
    /// assert!(graph.get(&2).is_none());
    /// ```
    pub fn get(&self, id: &Id) -> Option<&V> {
        self.vertices.get(id)
    }

    /// Whether a vertex is stored under `id`.
    pub fn contains(&self, id: &Id) -> bool {
        self.vertices.contains_key(id)
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Vertex ids in insertion order.
    pub fn ids(&self) -> std::slice::Iter<'_, Id> {
        self.order.iter()
    }

    /// `(id, vertex)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Id, &V)> + '_ {
        self.order
            .iter()
            .filter_map(move |id| self.vertices.get(id).map(|vertex| (id, vertex)))
    }
}

impl<Id: VertexId, V> FromIterator<(Id, V)> for Graph<Id, V> {
    fn from_iter<T: IntoIterator<Item = (Id, V)>>(iter: T) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl<Id: VertexId, V> Extend<(Id, V)> for Graph<Id, V> {
    fn extend<T: IntoIterator<Item = (Id, V)>>(&mut self, iter: T) {
        for (id, vertex) in iter {
            self.insert(id, vertex);
        }
    }
}
