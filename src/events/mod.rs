//! Events announced by a running machine.
//!
//! A machine reports accepted transitions on the `transition` channel and
//! rejected ones on the `error` channel through an injected [`Notifier`].
//! [`EventDispatcher`] fans events out to subscribed listeners and
//! [`EventLog`] simply records them.

mod dispatcher;
mod notifier;

pub use dispatcher::{EventDispatcher, Subscription};
pub use notifier::{Channel, EventLog, MachineEvent, NoopNotifier, Notifier};
