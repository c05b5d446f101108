//! Persisted-state accessor contract for the host element's attributes.
//!
//! The widget treats a small string key/value store as its system of record. In the browser that
//! store is the host element's attribute map; other runtimes can supply any store that offers the
//! same `get`/`set`/`subscribe` surface with batched change notification.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    rc::{Rc, Weak},
};

use crate::{error::PickerError, subscription::Subscription};

/// Callback invoked once per batch of writes touching a watched key.
pub type AttributeListener = Rc<dyn Fn()>;

/// Host key/value store with change notification.
pub trait AttributeStore {
    /// Reads a value.
    fn get(&self, name: &str) -> Option<String>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::AttributeWrite`] when the host rejects the write.
    fn set(&self, name: &str, value: &str) -> Result<(), PickerError>;

    /// Registers `listener` for changes to any of `names`.
    ///
    /// Notifications are delivered after the writing code returns, at most once per batch of
    /// writes, never synchronously from inside [`AttributeStore::set`].
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::HostUnavailable`] when the host cannot observe changes.
    fn subscribe(
        &self,
        names: &[&str],
        listener: AttributeListener,
    ) -> Result<Subscription, PickerError>;
}

struct Watcher {
    id: u64,
    names: Vec<String>,
    listener: AttributeListener,
}

#[derive(Default)]
struct MemoryAttributeState {
    values: BTreeMap<String, String>,
    watchers: Vec<Watcher>,
    next_watcher_id: u64,
    dirty: BTreeSet<String>,
}

/// In-memory attribute store for non-DOM hosts and tests.
///
/// Writes are queued and delivered by [`MemoryAttributeStore::flush`], mirroring how the browser
/// delivers mutation records after the current task.
#[derive(Clone, Default)]
pub struct MemoryAttributeStore {
    inner: Rc<RefCell<MemoryAttributeState>>,
}

impl MemoryAttributeStore {
    /// Store pre-populated with `(name, value)` pairs. Seeding does not notify.
    pub fn with_values<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().values.extend(
            values
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.to_string())),
        );
        store
    }

    /// Removes a value, queueing a notification when it existed.
    pub fn remove(&self, name: &str) {
        let mut state = self.inner.borrow_mut();
        if state.values.remove(name).is_some() {
            state.dirty.insert(name.to_string());
        }
    }

    /// True when writes are waiting to be delivered.
    pub fn has_pending(&self) -> bool {
        !self.inner.borrow().dirty.is_empty()
    }

    /// Delivers queued changes: each watcher whose keys intersect the batch runs once.
    ///
    /// Returns the number of listeners invoked.
    pub fn flush(&self) -> usize {
        let listeners: Vec<AttributeListener> = {
            let mut state = self.inner.borrow_mut();
            let dirty = std::mem::take(&mut state.dirty);
            state
                .watchers
                .iter()
                .filter(|watcher| watcher.names.iter().any(|name| dirty.contains(name)))
                .map(|watcher| watcher.listener.clone())
                .collect()
        };
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    /// Number of live watchers.
    pub fn watcher_count(&self) -> usize {
        self.inner.borrow().watchers.len()
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn get(&self, name: &str) -> Option<String> {
        self.inner.borrow().values.get(name).cloned()
    }

    fn set(&self, name: &str, value: &str) -> Result<(), PickerError> {
        let mut state = self.inner.borrow_mut();
        state.values.insert(name.to_string(), value.to_string());
        state.dirty.insert(name.to_string());
        Ok(())
    }

    fn subscribe(
        &self,
        names: &[&str],
        listener: AttributeListener,
    ) -> Result<Subscription, PickerError> {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_watcher_id;
            state.next_watcher_id += 1;
            state.watchers.push(Watcher {
                id,
                names: names.iter().map(|name| name.to_string()).collect(),
                listener,
            });
            id
        };
        let weak: Weak<RefCell<MemoryAttributeState>> = Rc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().watchers.retain(|watcher| watcher.id != id);
            }
        }))
    }
}
