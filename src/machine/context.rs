//! State context and per-edge transition handlers.

use crate::core::TransitionError;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

pub(crate) type TransitionFn<I> = Rc<dyn Fn(I) -> Result<(), TransitionError>>;

/// Callable bound to one `(from, to)` edge.
///
/// Invoking it asks the owning manager to move along that edge. The manager
/// re-validates the move, so a handler taken from an old context is rejected
/// once the machine has moved on.
#[derive(Clone)]
pub struct TransitionHandler<Id, I> {
    from: Id,
    to: Id,
    invoke: TransitionFn<I>,
}

impl<Id, I> TransitionHandler<Id, I> {
    pub(crate) fn new(from: Id, to: Id, invoke: TransitionFn<I>) -> Self {
        Self { from, to, invoke }
    }

    /// Vertex the edge leaves.
    pub fn from(&self) -> &Id {
        &self.from
    }

    /// Vertex the edge enters.
    pub fn to(&self) -> &Id {
        &self.to
    }

    /// Attempt the transition with `input`.
    ///
    /// Rejections are also announced on the manager's `error` channel.
    pub fn invoke(&self, input: I) -> Result<(), TransitionError> {
        (self.invoke)(input)
    }
}

impl<Id: fmt::Debug, I> fmt::Debug for TransitionHandler<Id, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionHandler")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Handlers for every outgoing edge of one vertex, keyed by destination.
///
/// Keeps the vertex's edge order; duplicate edges get a single handler.
pub struct TransitionTable<Id, I> {
    handlers: Vec<TransitionHandler<Id, I>>,
    index: HashMap<Id, usize>,
}

impl<Id: Clone + Eq + Hash, I> TransitionTable<Id, I> {
    pub(crate) fn new() -> Self {
        Self {
            handlers: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Install `handler` unless one for its destination already exists.
    pub(crate) fn install(&mut self, handler: TransitionHandler<Id, I>) {
        if let Entry::Vacant(slot) = self.index.entry(handler.to.clone()) {
            slot.insert(self.handlers.len());
            self.handlers.push(handler);
        }
    }

    /// Handler for the edge into `to`.
    pub fn get(&self, to: &Id) -> Option<&TransitionHandler<Id, I>> {
        self.index.get(to).map(|&slot| &self.handlers[slot])
    }

    pub fn contains(&self, to: &Id) -> bool {
        self.index.contains_key(to)
    }

    /// Destinations in edge order.
    pub fn destinations(&self) -> impl Iterator<Item = &Id> + '_ {
        self.handlers.iter().map(TransitionHandler::to)
    }

    /// Handlers in edge order.
    pub fn iter(&self) -> std::slice::Iter<'_, TransitionHandler<Id, I>> {
        self.handlers.iter()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<Id: fmt::Debug, I> fmt::Debug for TransitionTable<Id, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.handlers.iter().map(TransitionHandler::to))
            .finish()
    }
}

/// Snapshot of where a machine is.
///
/// A new context replaces the old one on every accepted transition, so a
/// snapshot never changes after it is handed out.
#[derive(Debug)]
pub struct StateContext<Id, S, I> {
    /// Vertex the machine is in
    pub id: Id,
    /// State carried by that vertex
    pub state: S,
    /// Input of the transition that led here, `None` for the initial vertex
    pub input: Option<I>,
    pub(crate) transitions: Rc<TransitionTable<Id, I>>,
}

impl<Id, S, I> StateContext<Id, S, I> {
    /// Handlers for the outgoing edges of the current vertex.
    pub fn transitions(&self) -> &TransitionTable<Id, I> {
        &self.transitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn handler(from: &'static str, to: &'static str) -> TransitionHandler<&'static str, u8> {
        TransitionHandler::new(from, to, Rc::new(|_: u8| -> Result<(), TransitionError> { Ok(()) }))
    }

    #[test]
    fn table_keeps_edge_order_and_skips_duplicates() {
        let mut table = TransitionTable::new();
        table.install(handler("A", "C"));
        table.install(handler("A", "B"));
        table.install(handler("A", "C"));

        assert_eq!(table.len(), 2);
        assert_eq!(table.destinations().copied().collect::<Vec<_>>(), vec!["C", "B"]);
        assert!(table.get(&"D").is_none());
    }

    #[test]
    fn first_handler_for_a_destination_wins() {
        let mut table = TransitionTable::new();
        table.install(handler("A", "B"));
        table.install(TransitionHandler::new(
            "A",
            "B",
            Rc::new(|_: u8| -> Result<(), TransitionError> {
                Err(TransitionError::UninitializedState)
            }),
        ));

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"B").unwrap().invoke(0), Ok(()));
    }

    #[test]
    fn wide_vertex_looks_up_every_destination() {
        let mut table = TransitionTable::new();
        for to in (0..500u16).rev() {
            table.install(TransitionHandler::new(
                1000u16,
                to,
                Rc::new(|_: ()| -> Result<(), TransitionError> { Ok(()) }),
            ));
        }

        assert_eq!(table.len(), 500);
        assert_eq!(table.destinations().next(), Some(&499));
        assert!((0..500u16).all(|to| table.get(&to).map(TransitionHandler::to) == Some(&to)));
        assert!(!table.contains(&500));
    }

    #[test]
    fn handler_forwards_input() {
        let seen = Rc::new(Cell::new(0u8));
        let sink = Rc::clone(&seen);
        let handler = TransitionHandler::new(
            "A",
            "B",
            Rc::new(move |input: u8| -> Result<(), TransitionError> {
                sink.set(input);
                Ok(())
            }),
        );

        assert_eq!(handler.invoke(9), Ok(()));
        assert_eq!(seen.get(), 9);
        assert_eq!(*handler.from(), "A");
        assert_eq!(*handler.to(), "B");
    }
}
