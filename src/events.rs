//! Notifications emitted by the engine.
//!
//! Listeners are plain closures kept in registration order. The engine
//! queues an event after the mutation it describes and delivers the queue
//! before the triggering call returns.

use std::fmt;

use crate::player::PlayerId;
use crate::rules::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PhaseChanged(Phase),
    CurrentPlayerChanged(PlayerId),
    PlayerAdded(PlayerId),
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Ordered set of subscribers.
#[derive(Default)]
pub struct Listeners {
    subscribers: Vec<Listener>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.subscribers.len())
            .finish()
    }
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) {
        self.subscribers.push(Box::new(listener));
    }

    /// Delivers `event` to every listener in registration order.
    pub fn notify(&mut self, event: &GameEvent) {
        for listener in self.subscribers.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            listeners.subscribe(move |e| log.borrow_mut().push((tag, *e)));
        }

        listeners.notify(&GameEvent::PlayerAdded(PlayerId(0)));
        listeners.notify(&GameEvent::PhaseChanged(Phase::Draft));

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", GameEvent::PlayerAdded(PlayerId(0))),
                ("second", GameEvent::PlayerAdded(PlayerId(0))),
                ("first", GameEvent::PhaseChanged(Phase::Draft)),
                ("second", GameEvent::PhaseChanged(Phase::Draft)),
            ]
        );
    }

    #[test]
    fn empty_registry_is_fine() {
        let mut listeners = Listeners::new();
        assert!(listeners.is_empty());
        listeners.notify(&GameEvent::PhaseChanged(Phase::Attack));
        assert_eq!(listeners.len(), 0);
    }
}
