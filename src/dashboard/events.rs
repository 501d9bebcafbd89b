use std::collections::HashMap;

use crate::upload::SelectedFile;

/// A discrete user action delivered to the dashboard.
#[derive(Debug)]
pub enum UiEvent {
    OpenDialog,
    FileChosen(SelectedFile),
    FileDropped(SelectedFile),
    DragOver,
    DragLeave,
    RemoveFile,
    Submit,
    CancelDialog,
    KeyPressed(Key)
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Key {
    Escape
}

/// Handle returned by [`Subscriptions::subscribe`]; surrendering it is the
/// only way to deregister.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionId(u64);

/// Registry of key listeners with scoped acquisition.
///
/// The dialog registers its escape listener when it opens and removes it
/// when it closes, so repeated open/close cycles cannot accumulate
/// handlers.
#[derive(Debug)]
pub struct Subscriptions {
    next_id: u64,
    active: HashMap<u64, Key>
}

impl Subscriptions {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            active: HashMap::new()
        }
    }

    pub fn subscribe(&mut self, key: Key) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(id, key);

        SubscriptionId(id)
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) {
        self.active.remove(&subscription.0);
    }

    pub fn is_subscribed(&self, key: Key) -> bool {
        self.active.values().any(|active| *active == key)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}
