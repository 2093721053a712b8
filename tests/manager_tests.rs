//! End-to-end tests for the transition manager and its notifications.

use statepath::core::{Graph, MachineAccessor, VertexAccessor};
use statepath::events::{Channel, EventDispatcher, EventLog, MachineEvent};
use statepath::{graph, TransitionError, TransitionManager, VertexFields};
use std::cell::RefCell;
use std::rc::Rc;

fn start_mid_end() -> Graph<&'static str, statepath::Vertex<&'static str, &'static str>> {
    graph! {
        "Start" => "start-state"; ["Mid"],
        "Mid" => "mid-state"; ["End"],
        "End" => "end-state"; [],
    }
}

#[test]
fn walks_from_start_to_end() {
    let log = Rc::new(EventLog::new());
    let manager: TransitionManager<_, _, u32> =
        TransitionManager::builder(start_mid_end(), VertexFields::new("Start"))
            .notifier(Rc::clone(&log))
            .build()
            .unwrap();

    let context = manager.state_context();
    let to_mid = context.transitions().get(&"Mid").expect("Start has an edge to Mid");
    to_mid.invoke(1).unwrap();
    assert_eq!(manager.state_context().state, "mid-state");

    // Lookup miss is visible to the caller.
    assert!(manager.state_context().transitions().get(&"Start").is_none());

    manager.transition(&"End", 2).unwrap();
    assert_eq!(manager.state_context().state, "end-state");
    assert!(manager.is_terminal());

    assert_eq!(
        log.on(Channel::Transition),
        vec![
            MachineEvent::Transition {
                from: "Start",
                to: "Mid",
                input: 1
            },
            MachineEvent::Transition {
                from: "Mid",
                to: "End",
                input: 2
            },
        ]
    );
    assert!(log.on(Channel::Error).is_empty());
}

#[test]
fn rejected_transition_leaves_context_untouched() {
    let log = Rc::new(EventLog::new());
    let manager: TransitionManager<_, _, &str> =
        TransitionManager::builder(start_mid_end(), VertexFields::new("Start"))
            .notifier(Rc::clone(&log))
            .build()
            .unwrap();
    manager.transition(&"Mid", "first").unwrap();
    let before = manager.state_context();

    let stale_handler = {
        let mut handlers = before.transitions().iter();
        handlers.next().cloned().unwrap()
    };
    manager.transition(&"End", "second").unwrap();
    let settled = manager.state_context();

    let result = stale_handler.invoke("third");

    assert!(matches!(result, Err(TransitionError::StateMismatch { .. })));
    let after = manager.state_context();
    assert!(Rc::ptr_eq(&settled, &after));
    assert_eq!(after.input, Some("second"));
    assert_eq!(
        log.on(Channel::Error),
        vec![MachineEvent::Error {
            message: "invalid transition attempt from Mid, current state is End".to_string()
        }]
    );
}

#[test]
fn dispatcher_routes_manager_events_by_channel() {
    let dispatcher: Rc<EventDispatcher<&'static str, u32>> = Rc::new(EventDispatcher::new());
    let transitions = Rc::new(RefCell::new(Vec::new()));
    let errors = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&transitions);
    dispatcher.subscribe(Channel::Transition, move |event| {
        if let MachineEvent::Transition { from, to, .. } = event {
            sink.borrow_mut().push((*from, *to));
        }
    });
    let sink = Rc::clone(&errors);
    dispatcher.subscribe(Channel::Error, move |event| {
        if let MachineEvent::Error { message } = event {
            sink.borrow_mut().push(message.clone());
        }
    });

    let manager: TransitionManager<_, _, u32> =
        TransitionManager::builder(start_mid_end(), VertexFields::new("Start"))
            .notifier(Rc::clone(&dispatcher))
            .build()
            .unwrap();

    manager.transition(&"Mid", 1).unwrap();
    assert_eq!(
        manager.transition(&"Start", 2),
        Err(TransitionError::NoSuchTransition {
            from: "Mid".to_string(),
            to: "Start".to_string(),
        })
    );

    assert_eq!(*transitions.borrow(), vec![("Start", "Mid")]);
    assert_eq!(
        *errors.borrow(),
        vec!["no transition to Start is available from Mid".to_string()]
    );
}

#[test]
fn listener_may_drive_the_next_transition() {
    let dispatcher: Rc<EventDispatcher<&'static str, u32>> = Rc::new(EventDispatcher::new());
    let manager: Rc<TransitionManager<_, _, u32>> = Rc::new(
        TransitionManager::builder(start_mid_end(), VertexFields::new("Start"))
            .notifier(Rc::clone(&dispatcher))
            .build()
            .unwrap(),
    );

    let weak = Rc::downgrade(&manager);
    dispatcher.subscribe(Channel::Transition, move |event| {
        let MachineEvent::Transition { to, input, .. } = event else {
            return;
        };
        if *to == "Mid" {
            if let Some(manager) = weak.upgrade() {
                manager.transition(&"End", input + 1).unwrap();
            }
        }
    });

    manager.transition(&"Mid", 10).unwrap();

    let context = manager.state_context();
    assert_eq!(context.id, "End");
    assert_eq!(context.input, Some(11));
    assert_eq!(
        manager.history().unwrap().path(),
        vec![&"Start", &"Mid", &"End"]
    );
}

/// Vertex shape where the state differs from the id.
struct Room {
    number: u16,
    lit: bool,
    doors: Vec<u16>,
}

struct Floor {
    lobby: u16,
}

impl VertexAccessor<Room> for Floor {
    type Id = u16;
    type State = bool;

    fn id(&self, vertex: &Room) -> u16 {
        vertex.number
    }

    fn state(&self, vertex: &Room) -> bool {
        vertex.lit
    }

    fn edges(&self, vertex: &Room) -> Vec<u16> {
        vertex.doors.clone()
    }
}

impl MachineAccessor<Room> for Floor {
    fn initial(&self) -> u16 {
        self.lobby
    }
}

#[test]
fn custom_accessor_with_integer_ids() {
    let graph: Graph<u16, Room> = [
        Room {
            number: 100,
            lit: true,
            doors: vec![101, 102, 999],
        },
        Room {
            number: 101,
            lit: false,
            doors: vec![100],
        },
        Room {
            number: 102,
            lit: true,
            doors: vec![],
        },
    ]
    .into_iter()
    .map(|room| (room.number, room))
    .collect();

    let manager: TransitionManager<_, _, ()> =
        TransitionManager::new(graph, Floor { lobby: 100 }).unwrap();

    assert!(manager.state_context().state);
    assert_eq!(
        manager.transition(&999, ()),
        Err(TransitionError::UnknownDestination {
            to: "999".to_string()
        })
    );

    manager.transition(&101, ()).unwrap();
    assert!(!manager.state_context().state);

    manager.transition(&100, ()).unwrap();
    manager.transition(&102, ()).unwrap();
    assert!(manager.is_terminal());

    let edges: Vec<_> = manager.traverse().collect();
    assert_eq!(edges, vec![(100, 101), (100, 102)]);
}
