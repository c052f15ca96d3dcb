use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    OptionAdded,
    OptionRemoved,
}

impl SelectorEvent {
    /// Event name the host form listens for.
    pub fn name(self) -> &'static str {
        match self {
            SelectorEvent::OptionAdded => "backgroundAdded",
            SelectorEvent::OptionRemoved => "backgroundRemoved",
        }
    }
}

impl fmt::Display for SelectorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Box<dyn FnMut(SelectorEvent)>;

/// Synchronous fan-out of selector events to host listeners.
#[derive(Default)]
pub struct EventBridge {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: usize,
}

impl fmt::Debug for EventBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBridge")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBridge {
    pub fn subscribe(&mut self, listener: impl FnMut(SelectorEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        before != self.listeners.len()
    }

    pub fn emit(&mut self, event: SelectorEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emits_to_listeners_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bridge = EventBridge::default();
        let first = Rc::clone(&seen);
        bridge.subscribe(move |event| first.borrow_mut().push(("first", event)));
        let second = Rc::clone(&seen);
        bridge.subscribe(move |event| second.borrow_mut().push(("second", event)));
        bridge.emit(SelectorEvent::OptionRemoved);
        assert_eq!(
            *seen.borrow(),
            vec![
                ("first", SelectorEvent::OptionRemoved),
                ("second", SelectorEvent::OptionRemoved)
            ]
        );
    }

    #[test]
    fn unsubscribed_listeners_stay_quiet() {
        let count = Rc::new(RefCell::new(0));
        let mut bridge = EventBridge::default();
        let counter = Rc::clone(&count);
        let id = bridge.subscribe(move |_| *counter.borrow_mut() += 1);
        assert!(bridge.unsubscribe(id));
        assert!(!bridge.unsubscribe(id));
        bridge.emit(SelectorEvent::OptionAdded);
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn exposes_host_event_names() {
        assert_eq!(SelectorEvent::OptionAdded.to_string(), "backgroundAdded");
        assert_eq!(SelectorEvent::OptionRemoved.name(), "backgroundRemoved");
    }
}
