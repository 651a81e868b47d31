//! Change notifications for roster views.
//!
//! # Responsibility
//! - Describe what changed after a successful mutation.
//! - Deliver events to registered callbacks in registration order.
//!
//! # Invariants
//! - Events are only emitted after the mutation has been applied.
//! - Listener ids are never reused within one bus.

use crate::model::fields::{GroupName, PersonName};
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// What the result panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultView {
    #[default]
    Persons,
    Groups,
    GroupDetails {
        group: GroupName,
    },
    Attendance {
        person: PersonName,
        group: GroupName,
    },
}

/// Notification emitted by `RosterService`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterEvent {
    /// Person list or person filter changed.
    PersonsChanged,
    /// Group list, group filter, or any group content changed.
    GroupsChanged,
    /// The result view switched (or its subject changed).
    ViewChanged(ResultView),
}

/// Handle returned by `subscribe`, used to unsubscribe.
pub type ListenerId = u64;

pub type Listener = Box<dyn FnMut(&RosterEvent)>;

/// In-process callback registry.
#[derive(Default)]
pub struct EventBus {
    next_id: ListenerId,
    listeners: BTreeMap<ListenerId, Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    /// Removes a listener; returns false for unknown ids.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: &RosterEvent) {
        for listener in self.listeners.values_mut() {
            listener(event);
        }
    }
}

impl Debug for EventBus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, RosterEvent};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn delivers_to_subscribers_until_unsubscribed() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = bus.subscribe(Box::new(move |event| sink.borrow_mut().push(event.clone())));

        bus.emit(&RosterEvent::PersonsChanged);
        assert!(bus.unsubscribe(id));
        bus.emit(&RosterEvent::GroupsChanged);

        assert_eq!(*seen.borrow(), vec![RosterEvent::PersonsChanged]);
        assert!(!bus.unsubscribe(id));
        assert!(bus.is_empty());
    }
}
