//! Notification contract between a machine and its observers.

use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Named channel an event is published on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Transition,
    Error,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transition => "transition",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something a machine announces.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "channel", rename_all = "lowercase")]
pub enum MachineEvent<Id, I> {
    /// A transition was accepted
    Transition { from: Id, to: Id, input: I },

    /// A transition was rejected
    Error { message: String },
}

impl<Id, I> MachineEvent<Id, I> {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Transition { .. } => Channel::Transition,
            Self::Error { .. } => Channel::Error,
        }
    }
}

/// Fire-and-forget sink for machine events.
pub trait Notifier<Id, I> {
    fn notify(&self, event: MachineEvent<Id, I>);
}

impl<Id, I, T: Notifier<Id, I> + ?Sized> Notifier<Id, I> for Rc<T> {
    fn notify(&self, event: MachineEvent<Id, I>) {
        (**self).notify(event)
    }
}

/// Notifier that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopNotifier;

impl<Id, I> Notifier<Id, I> for NoopNotifier {
    fn notify(&self, _event: MachineEvent<Id, I>) {}
}

/// Notifier that keeps every event in arrival order.
///
/// # Example
///
/// ```rust
/// use statepath::events::{Channel, EventLog, MachineEvent, Notifier};
///
/// let log = EventLog::new();
/// log.notify(MachineEvent::<&str, ()>::Error { message: "nope".to_string() });
///
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.on(Channel::Error).len(), 1);
/// ```
pub struct EventLog<Id, I> {
    events: RefCell<Vec<MachineEvent<Id, I>>>,
}

impl<Id, I> Default for EventLog<Id, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, I> EventLog<Id, I> {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<MachineEvent<Id, I>> {
        std::mem::take(&mut *self.events.borrow_mut())
    }
}

impl<Id: Clone, I: Clone> EventLog<Id, I> {
    pub fn events(&self) -> Vec<MachineEvent<Id, I>> {
        self.events.borrow().clone()
    }

    /// Events published on `channel`, in arrival order.
    pub fn on(&self, channel: Channel) -> Vec<MachineEvent<Id, I>> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.channel() == channel)
            .cloned()
            .collect()
    }
}

impl<Id, I> Notifier<Id, I> for EventLog<Id, I> {
    fn notify(&self, event: MachineEvent<Id, I>) {
        self.events.borrow_mut().push(event);
    }
}

impl<Id: fmt::Debug, I: fmt::Debug> fmt::Debug for EventLog<Id, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog")
            .field("events", &self.events.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_report_their_channel() {
        let transition: MachineEvent<&str, u8> = MachineEvent::Transition {
            from: "A",
            to: "B",
            input: 1,
        };
        let error: MachineEvent<&str, u8> = MachineEvent::Error {
            message: "bad".to_string(),
        };

        assert_eq!(transition.channel(), Channel::Transition);
        assert_eq!(error.channel().as_str(), "error");
        assert_eq!(Channel::Transition.to_string(), "transition");
    }

    #[test]
    fn events_serialize_with_channel_tag() {
        let event: MachineEvent<&str, u8> = MachineEvent::Transition {
            from: "A",
            to: "B",
            input: 7,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "channel": "transition", "from": "A", "to": "B", "input": 7 })
        );
    }

    #[test]
    fn event_log_records_in_order_and_drains() {
        let log: EventLog<&str, ()> = EventLog::new();
        log.notify(MachineEvent::Error {
            message: "first".to_string(),
        });
        log.notify(MachineEvent::Transition {
            from: "A",
            to: "B",
            input: (),
        });

        assert_eq!(log.on(Channel::Transition).len(), 1);
        let drained = log.take();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].channel(), Channel::Error);
        assert!(log.is_empty());
    }

    #[test]
    fn shared_notifier_forwards_through_rc() {
        let log: Rc<EventLog<&str, ()>> = Rc::new(EventLog::new());
        let shared: Rc<dyn Notifier<&str, ()>> = log.clone();

        shared.notify(MachineEvent::Error {
            message: "x".to_string(),
        });

        assert_eq!(log.len(), 1);
    }
}
