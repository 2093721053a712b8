//! Lazy depth-first edge discovery.

use super::accessor::VertexAccessor;
use super::graph::Graph;
use std::collections::HashSet;
use tracing::trace;

/// Walk `graph` depth-first and yield each discovery edge `(from, to)`.
///
/// Roots are taken in the graph's insertion order. A vertex is entered at
/// most once, so an edge into an already visited vertex (a back-edge, a
/// self-loop or a second path) yields nothing. Edge targets missing from the
/// graph are skipped silently.
///
/// The returned iterator is lazy; every call starts with a fresh visited set.
///
/// # Example
///
/// ```rust
/// use statepath::core::{traverse, VertexFields};
/// use statepath::graph;
///
/// let graph = graph! {
///     "A" => "alpha"; ["B"],
///     "B" => "beta"; ["C"],
///     "C" => "gamma"; ["A"],
/// };
///
/// let edges: Vec<_> = traverse(&graph, &VertexFields::new("A")).collect();
/// assert_eq!(edges, vec![("A", "B"), ("B", "C")]);
/// ```
pub fn traverse<'g, V, A>(graph: &'g Graph<A::Id, V>, accessor: &'g A) -> Traversal<'g, V, A>
where
    A: VertexAccessor<V>,
{
    Traversal {
        graph,
        accessor,
        roots: graph.ids(),
        visited: HashSet::with_capacity(graph.len()),
        stack: Vec::new(),
    }
}

/// A vertex on the descent path with the edges still to explore.
struct Frame<Id> {
    id: Id,
    edges: std::vec::IntoIter<Id>,
}

/// Iterator returned by [`traverse`].
pub struct Traversal<'g, V, A: VertexAccessor<V>> {
    graph: &'g Graph<A::Id, V>,
    accessor: &'g A,
    roots: std::slice::Iter<'g, A::Id>,
    visited: HashSet<A::Id>,
    stack: Vec<Frame<A::Id>>,
}

impl<'g, V, A: VertexAccessor<V>> Traversal<'g, V, A> {
    /// Number of vertices entered so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Mark `vertex` visited and push it onto the descent path.
    ///
    /// Returns the vertex id, or `None` when it was already visited.
    fn enter(&mut self, vertex: &V) -> Option<A::Id> {
        let id = self.accessor.id(vertex);
        if !self.visited.insert(id.clone()) {
            return None;
        }
        self.stack.push(Frame {
            id: id.clone(),
            edges: self.accessor.edges(vertex).into_iter(),
        });
        Some(id)
    }
}

impl<'g, V, A: VertexAccessor<V>> Iterator for Traversal<'g, V, A> {
    type Item = (A::Id, A::Id);

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        loop {
            if let Some(frame) = self.stack.last_mut() {
                let Some(edge) = frame.edges.next() else {
                    self.stack.pop();
                    continue;
                };
                let from = frame.id.clone();
                // Dangling targets are skipped.
                let Some(vertex) = graph.get(&edge) else {
                    continue;
                };
                if let Some(to) = self.enter(vertex) {
                    trace!(%from, %to, "discovered edge");
                    return Some((from, to));
                }
                continue;
            }

            let root = self.roots.next()?;
            if self.visited.contains(root) {
                continue;
            }
            if let Some(vertex) = graph.get(root) {
                self.enter(vertex);
            }
        }
    }
}
