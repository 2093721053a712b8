//! Transition manager: a live machine over a graph.

use crate::builder::{BuildError, TransitionManagerBuilder};
use crate::core::{
    traverse, validate_transition, Graph, MachineAccessor, Traversal, TransitionError,
    TransitionHistory, TransitionRecord,
};
use crate::events::{MachineEvent, Notifier};
use crate::machine::context::{StateContext, TransitionFn, TransitionHandler, TransitionTable};
use chrono::Utc;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

type Context<V, A, I> =
    StateContext<<A as crate::core::VertexAccessor<V>>::Id, <A as crate::core::VertexAccessor<V>>::State, I>;

/// Controller that only lets the machine move along graph edges.
///
/// The manager starts in the accessor's initial vertex. The current
/// [`StateContext`] exposes one handler per outgoing edge; invoking a handler
/// re-validates the move and either replaces the context and announces the
/// transition, or leaves the context untouched and announces an error.
///
/// # Example
///
/// ```rust
/// use statepath::core::VertexFields;
/// use statepath::graph;
/// use statepath::machine::TransitionManager;
///
/// let graph = graph! {
///     "Start" => "starting"; ["Mid"],
///     "Mid" => "working"; ["End"],
///     "End" => "done"; [],
/// };
///
/// let manager: TransitionManager<_, _, u32> =
///     TransitionManager::new(graph, VertexFields::new("Start")).unwrap();
///
/// let context = manager.state_context();
/// let handler = context.transitions().get(&"Mid").unwrap();
/// handler.invoke(1).unwrap();
///
/// assert_eq!(manager.state_context().state, "working");
/// assert_eq!(manager.state_context().input, Some(1));
/// assert!(manager.transition(&"Start", 2).is_err());
/// ```
pub struct TransitionManager<V, A: MachineAccessor<V>, I> {
    shared: Rc<Shared<V, A, I>>,
}

struct Shared<V, A: MachineAccessor<V>, I> {
    this: Weak<Self>,
    graph: Graph<A::Id, V>,
    accessor: A,
    notifier: Rc<dyn Notifier<A::Id, I>>,
    machine: RefCell<Machine<V, A, I>>,
}

struct Machine<V, A: MachineAccessor<V>, I> {
    current: Rc<Context<V, A, I>>,
    tables: HashMap<A::Id, Rc<TransitionTable<A::Id, I>>>,
    history: Option<TransitionHistory<A::Id>>,
}

impl<V, A, I> TransitionManager<V, A, I>
where
    V: 'static,
    A: MachineAccessor<V> + 'static,
    I: Clone + 'static,
{
    /// Create a manager with the default configuration.
    ///
    /// Fails with [`BuildError::MissingInitialVertex`] when the accessor's
    /// initial id is not in the graph.
    pub fn new(graph: Graph<A::Id, V>, accessor: A) -> Result<Self, BuildError> {
        Self::builder(graph, accessor).build()
    }

    /// Start configuring a manager; see [`TransitionManagerBuilder`].
    pub fn builder(graph: Graph<A::Id, V>, accessor: A) -> TransitionManagerBuilder<V, A, I> {
        TransitionManagerBuilder::new(graph, accessor)
    }

    pub(crate) fn assemble(
        graph: Graph<A::Id, V>,
        accessor: A,
        notifier: Rc<dyn Notifier<A::Id, I>>,
        history: Option<TransitionHistory<A::Id>>,
    ) -> Result<Self, BuildError> {
        let initial = accessor.initial();
        let Some(vertex) = graph.get(&initial) else {
            return Err(BuildError::MissingInitialVertex {
                initial: initial.to_string(),
            });
        };
        let state = accessor.state(vertex);
        let edges = accessor.edges(vertex);

        debug!(%initial, vertices = graph.len(), "transition manager ready");

        let shared = Rc::new_cyclic(move |this: &Weak<Shared<V, A, I>>| {
            let transitions = Rc::new(build_table(this, &initial, edges));
            let mut tables = HashMap::new();
            tables.insert(initial.clone(), Rc::clone(&transitions));
            let current = Rc::new(StateContext {
                id: initial,
                state,
                input: None,
                transitions,
            });

            Shared {
                this: this.clone(),
                graph,
                accessor,
                notifier,
                machine: RefCell::new(Machine {
                    current,
                    tables,
                    history,
                }),
            }
        });

        Ok(Self { shared })
    }

    /// Current context. The snapshot does not change when the machine moves.
    pub fn state_context(&self) -> Rc<Context<V, A, I>> {
        Rc::clone(&self.shared.machine.borrow().current)
    }

    /// Id of the current vertex.
    pub fn current(&self) -> A::Id {
        self.shared.machine.borrow().current.id.clone()
    }

    /// Invoke the current context's handler for `to`.
    ///
    /// A destination without a handler fails with
    /// [`TransitionError::NoSuchTransition`], which is announced like any
    /// other rejection.
    pub fn transition(&self, to: &A::Id, input: I) -> Result<(), TransitionError> {
        let context = self.state_context();
        match context.transitions().get(to) {
            Some(handler) => handler.invoke(input),
            None => self.shared.reject(TransitionError::NoSuchTransition {
                from: context.id.to_string(),
                to: to.to_string(),
            }),
        }
    }

    /// Whether the current vertex has no outgoing edges.
    pub fn is_terminal(&self) -> bool {
        self.state_context().transitions().is_empty()
    }

    /// Snapshot of the accepted transitions, or `None` when history is
    /// disabled.
    pub fn history(&self) -> Option<TransitionHistory<A::Id>> {
        self.shared.machine.borrow().history.clone()
    }

    /// The managed graph.
    pub fn graph(&self) -> &Graph<A::Id, V> {
        &self.shared.graph
    }

    pub fn accessor(&self) -> &A {
        &self.shared.accessor
    }

    /// Discovery edges of the managed graph.
    pub fn traverse(&self) -> Traversal<'_, V, A> {
        traverse(&self.shared.graph, &self.shared.accessor)
    }
}

impl<V, A, I> Shared<V, A, I>
where
    V: 'static,
    A: MachineAccessor<V> + 'static,
    I: Clone + 'static,
{
    fn handle_transition(&self, from: &A::Id, to: &A::Id, input: I) -> Result<(), TransitionError> {
        if let Err(err) = self.advance(from, to, input.clone()) {
            return self.reject(err);
        }

        debug!(%from, %to, "transition accepted");
        self.notifier.notify(MachineEvent::Transition {
            from: from.clone(),
            to: to.clone(),
            input,
        });
        Ok(())
    }

    fn reject(&self, err: TransitionError) -> Result<(), TransitionError> {
        warn!(error = %err, "transition rejected");
        self.notifier.notify(MachineEvent::Error {
            message: err.to_string(),
        });
        Err(err)
    }

    /// Validate and replace the current context. The borrow ends before any
    /// notification goes out.
    fn advance(&self, from: &A::Id, to: &A::Id, input: I) -> Result<(), TransitionError> {
        let mut guard = self.machine.borrow_mut();
        let machine = &mut *guard;

        validate_transition(
            Some(&machine.current.id),
            from,
            to,
            &self.graph,
            &self.accessor,
        )?;

        let Some(vertex) = self.graph.get(to) else {
            return Err(TransitionError::UnknownDestination { to: to.to_string() });
        };

        let cached = machine.tables.get(to).cloned();
        let transitions = match cached {
            Some(table) => table,
            None => {
                let table = Rc::new(build_table(&self.this, to, self.accessor.edges(vertex)));
                machine.tables.insert(to.clone(), Rc::clone(&table));
                table
            }
        };

        machine.current = Rc::new(StateContext {
            id: to.clone(),
            state: self.accessor.state(vertex),
            input: Some(input),
            transitions,
        });

        if let Some(history) = machine.history.as_mut() {
            history.record(TransitionRecord {
                from: from.clone(),
                to: to.clone(),
                timestamp: Utc::now(),
            });
        }

        Ok(())
    }
}

/// One handler per distinct edge of `from`, each holding a weak reference
/// back to the manager.
fn build_table<V, A, I>(
    this: &Weak<Shared<V, A, I>>,
    from: &A::Id,
    edges: Vec<A::Id>,
) -> TransitionTable<A::Id, I>
where
    V: 'static,
    A: MachineAccessor<V> + 'static,
    I: Clone + 'static,
{
    let mut table = TransitionTable::new();
    for to in edges {
        if table.contains(&to) {
            continue;
        }
        let weak = Weak::clone(this);
        let (edge_from, edge_to) = (from.clone(), to.clone());
        let invoke: TransitionFn<I> =
            Rc::new(move |input: I| -> Result<(), TransitionError> {
                match weak.upgrade() {
                    Some(shared) => shared.handle_transition(&edge_from, &edge_to, input),
                    None => Err(TransitionError::Detached {
                        from: edge_from.to_string(),
                        to: edge_to.to_string(),
                    }),
                }
            });
        table.install(TransitionHandler::new(from.clone(), to, invoke));
    }
    table
}

impl<V, A: MachineAccessor<V>, I> fmt::Debug for TransitionManager<V, A, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let machine = self.shared.machine.borrow();
        f.debug_struct("TransitionManager")
            .field("current", &machine.current.id)
            .field("transitions", machine.current.transitions())
            .field("vertices", &self.shared.graph.len())
            .finish_non_exhaustive()
    }
}
