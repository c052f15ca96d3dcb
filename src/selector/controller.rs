use tracing::debug;

use super::events::{EventBridge, ListenerId, SelectorEvent};
use super::store::{OptionStore, StoredOption};

/// Owns the option store and turns every mutation into ordered notifications:
/// removal of the previous active value is always emitted before the addition
/// of the next one.
#[derive(Debug, Default)]
pub struct SelectionController {
    store: OptionStore,
    bridge: EventBridge,
}

impl SelectionController {
    pub fn new(current: usize) -> Self {
        Self {
            store: OptionStore::new(current),
            bridge: EventBridge::default(),
        }
    }

    pub fn current(&self) -> usize {
        self.store.current()
    }

    pub fn stored(&self) -> Option<&StoredOption> {
        self.store.active()
    }

    pub fn store(&self) -> &OptionStore {
        &self.store
    }

    pub fn subscribe(&mut self, listener: impl FnMut(SelectorEvent) + 'static) -> ListenerId {
        self.bridge.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bridge.unsubscribe(id)
    }

    /// Record an initial value without notifying anyone.
    pub fn seed(&mut self, index: usize, option: StoredOption) {
        self.store.insert(index, option);
    }

    /// Apply a value change reported by the field at `index`. Changes on
    /// fields other than the current one are stored silently.
    pub fn record(&mut self, index: usize, option: Option<StoredOption>) {
        let has_value = option.is_some();
        let previous = match option {
            Some(option) => self.store.insert(index, option),
            None => self.store.remove(index),
        };
        if index != self.store.current() {
            debug!(index, has_value, "stored value for inactive choice");
            return;
        }
        self.transition(previous.is_some(), has_value);
    }

    /// Move the current index; the host is notified as if the old value went
    /// away and the new one arrived.
    pub fn select(&mut self, index: usize) {
        let had_value = self.store.active().is_some();
        self.store.set_current(index);
        let has_value = self.store.active().is_some();
        debug!(index, had_value, has_value, "selected choice");
        self.transition(had_value, has_value);
    }

    fn transition(&mut self, had_value: bool, has_value: bool) {
        if had_value {
            self.bridge.emit(SelectorEvent::OptionRemoved);
        }
        if has_value {
            self.bridge.emit(SelectorEvent::OptionAdded);
        }
    }
}
