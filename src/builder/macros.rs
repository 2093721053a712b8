//! Macros for ergonomic graph construction.

/// Build a [`Graph`](crate::core::Graph) of [`Vertex`](crate::core::Vertex)
/// values.
///
/// Each entry is `id => state; [edges]`. Vertices are inserted in the order
/// written, which is also the traversal root order. The id expression is
/// evaluated twice, once for the key and once for the vertex.
///
/// # Example
///
/// ```
/// use statepath::graph;
///
/// let graph = graph! {
///     "Locked" => false; ["Unlocked"],
///     "Unlocked" => true; ["Locked"],
/// };
///
/// assert_eq!(graph.len(), 2);
/// assert_eq!(graph.get(&"Unlocked").unwrap().edges, vec!["Locked"]);
/// ```
#[macro_export]
macro_rules! graph {
    (
        $(
            $id:expr => $state:expr ; [ $($edge:expr),* $(,)? ]
        ),* $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut graph = $crate::core::Graph::new();
        $(
            graph.insert($id, $crate::core::Vertex::new($id, $state, vec![$($edge),*]));
        )*
        graph
    }};
}
