//! Builder for constructing transition managers.

use crate::builder::error::BuildError;
use crate::core::{Graph, MachineAccessor, TransitionHistory, DEFAULT_HISTORY_LIMIT};
use crate::events::{NoopNotifier, Notifier};
use crate::machine::TransitionManager;
use std::rc::Rc;

/// Builder for configuring a [`TransitionManager`] with a fluent API.
///
/// Defaults: events are dropped, history is tracked and keeps the last
/// [`DEFAULT_HISTORY_LIMIT`] transitions.
///
/// # Example
///
/// ```rust
/// use statepath::builder::TransitionManagerBuilder;
/// use statepath::core::VertexFields;
/// use statepath::events::{Channel, EventLog};
/// use statepath::graph;
/// use statepath::machine::TransitionManager;
/// use std::rc::Rc;
///
/// let graph = graph! {
///     "Draft" => 0; ["Review"],
///     "Review" => 1; ["Draft", "Published"],
///     "Published" => 2; [],
/// };
/// let log = Rc::new(EventLog::new());
///
/// let manager: TransitionManager<_, _, &str> =
///     TransitionManagerBuilder::new(graph, VertexFields::new("Draft"))
///         .notifier(Rc::clone(&log))
///         .history_limit(16)
///         .build()
///         .unwrap();
///
/// manager.transition(&"Review", "submitted").unwrap();
/// assert_eq!(log.on(Channel::Transition).len(), 1);
/// ```
pub struct TransitionManagerBuilder<V, A: MachineAccessor<V>, I> {
    graph: Graph<A::Id, V>,
    accessor: A,
    notifier: Rc<dyn Notifier<A::Id, I>>,
    track_history: bool,
    history_limit: Option<usize>,
}

impl<V, A, I> TransitionManagerBuilder<V, A, I>
where
    V: 'static,
    A: MachineAccessor<V> + 'static,
    I: Clone + 'static,
{
    /// Create a builder over `graph`, read through `accessor`.
    pub fn new(graph: Graph<A::Id, V>, accessor: A) -> Self {
        Self {
            graph,
            accessor,
            notifier: Rc::new(NoopNotifier),
            track_history: true,
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }

    /// Send transition and error events to `notifier`.
    pub fn notifier<N>(mut self, notifier: N) -> Self
    where
        N: Notifier<A::Id, I> + 'static,
    {
        self.notifier = Rc::new(notifier);
        self
    }

    /// Enable or disable transition history.
    pub fn track_history(mut self, enabled: bool) -> Self {
        self.track_history = enabled;
        self
    }

    /// Keep at most `limit` history records, dropping the oldest.
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Keep every accepted transition. Memory grows with each one.
    pub fn unbounded_history(mut self) -> Self {
        self.history_limit = None;
        self
    }

    /// Build the manager.
    /// Returns an error if the initial vertex is missing from the graph.
    pub fn build(self) -> Result<TransitionManager<V, A, I>, BuildError> {
        let history = self.track_history.then(|| match self.history_limit {
            Some(limit) => TransitionHistory::bounded(limit),
            None => TransitionHistory::new(),
        });

        TransitionManager::assemble(self.graph, self.accessor, self.notifier, history)
    }
}
