//! Transition guard.
//!
//! Decides whether a proposed move from the recorded current vertex to a
//! candidate vertex is legal. Unlike traversal, which skips dangling edges,
//! the guard rejects any destination that is not in the graph.

use super::accessor::VertexAccessor;
use super::error::TransitionError;
use super::graph::Graph;

/// Check a transition from `from` to `to`.
///
/// `current` is the vertex id recorded by the machine, or `None` before a
/// machine is initialized. Checks run in a fixed order and the first failure
/// wins:
///
/// 1. `current` is present ([`TransitionError::UninitializedState`])
/// 2. `current` equals `from` ([`TransitionError::StateMismatch`])
/// 3. `to` exists in the graph ([`TransitionError::UnknownDestination`])
/// 4. `to` is an outgoing edge of `from` ([`TransitionError::IllegalTransition`])
/// 5. `from` has outgoing edges at all ([`TransitionError::TerminalState`])
///
/// Check 5 can only fail for an empty edge list, and check 4 has already
/// rejected every destination in that case. It is kept so the terminal
/// condition stays spelled out.
///
/// # Example
///
/// ```rust
/// use statepath::core::{validate_transition, TransitionError, VertexFields};
/// use statepath::graph;
///
/// let graph = graph! {
///     "A" => 1; ["B", "C"],
///     "B" => 2; [],
///     "C" => 3; [],
/// };
/// let accessor = VertexFields::new("A");
///
/// assert!(validate_transition(Some(&"A"), &"A", &"B", &graph, &accessor).is_ok());
/// assert!(matches!(
///     validate_transition(Some(&"Z"), &"A", &"B", &graph, &accessor),
///     Err(TransitionError::StateMismatch { .. })
/// ));
/// ```
pub fn validate_transition<V, A>(
    current: Option<&A::Id>,
    from: &A::Id,
    to: &A::Id,
    graph: &Graph<A::Id, V>,
    accessor: &A,
) -> Result<(), TransitionError>
where
    A: VertexAccessor<V>,
{
    let Some(current) = current else {
        return Err(TransitionError::UninitializedState);
    };

    if current != from {
        return Err(TransitionError::StateMismatch {
            attempted: from.to_string(),
            current: current.to_string(),
        });
    }

    if !graph.contains(to) {
        return Err(TransitionError::UnknownDestination { to: to.to_string() });
    }

    let edges = graph
        .get(from)
        .map(|vertex| accessor.edges(vertex))
        .unwrap_or_default();

    if !edges.contains(to) {
        return Err(TransitionError::IllegalTransition {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    if edges.is_empty() {
        return Err(TransitionError::TerminalState {
            from: from.to_string(),
        });
    }

    Ok(())
}
