//! Publish/subscribe dispatcher keyed by [`Channel`].

use super::notifier::{Channel, MachineEvent, Notifier};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type Listener<Id, I> = Rc<dyn Fn(&MachineEvent<Id, I>)>;

/// Handle returned by [`EventDispatcher::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    channel: Channel,
    id: u64,
}

impl Subscription {
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

/// Routes events to the listeners subscribed to their channel.
///
/// Listeners run in subscription order. The listener list is captured when
/// dispatch starts, so subscribing or unsubscribing from inside a listener
/// takes effect on the next dispatch.
///
/// # Example
///
/// ```rust
/// use statepath::events::{Channel, EventDispatcher, MachineEvent};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let dispatcher: EventDispatcher<&str, ()> = EventDispatcher::new();
/// let errors = Rc::new(Cell::new(0));
///
/// let counter = errors.clone();
/// let subscription = dispatcher.subscribe(Channel::Error, move |_| counter.set(counter.get() + 1));
///
/// dispatcher.dispatch(&MachineEvent::Error { message: "boom".to_string() });
/// assert_eq!(errors.get(), 1);
///
/// assert!(dispatcher.unsubscribe(&subscription));
/// dispatcher.dispatch(&MachineEvent::Error { message: "boom".to_string() });
/// assert_eq!(errors.get(), 1);
/// ```
pub struct EventDispatcher<Id, I> {
    listeners: RefCell<HashMap<Channel, Vec<(u64, Listener<Id, I>)>>>,
    next_id: Cell<u64>,
}

impl<Id, I> Default for EventDispatcher<Id, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, I> EventDispatcher<Id, I> {
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn subscribe<F>(&self, channel: Channel, listener: F) -> Subscription
    where
        F: Fn(&MachineEvent<Id, I>) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners
            .borrow_mut()
            .entry(channel)
            .or_default()
            .push((id, Rc::new(listener)));
        Subscription { channel, id }
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let Some(list) = listeners.get_mut(&subscription.channel) else {
            return false;
        };
        let before = list.len();
        list.retain(|(id, _)| *id != subscription.id);
        before != list.len()
    }

    pub fn dispatch(&self, event: &MachineEvent<Id, I>) {
        let snapshot: Vec<Listener<Id, I>> = self
            .listeners
            .borrow()
            .get(&event.channel())
            .map(|list| list.iter().map(|(_, listener)| Rc::clone(listener)).collect())
            .unwrap_or_default();

        for listener in snapshot {
            listener(event);
        }
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        self.listeners
            .borrow()
            .get(&channel)
            .map_or(0, |list| list.len())
    }
}

impl<Id, I> Notifier<Id, I> for EventDispatcher<Id, I> {
    fn notify(&self, event: MachineEvent<Id, I>) {
        self.dispatch(&event);
    }
}

impl<Id, I> fmt::Debug for EventDispatcher<Id, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self.listeners.borrow();
        f.debug_struct("EventDispatcher")
            .field("transition", &listeners.get(&Channel::Transition).map_or(0, Vec::len))
            .field("error", &listeners.get(&Channel::Error).map_or(0, Vec::len))
            .finish()
    }
}
