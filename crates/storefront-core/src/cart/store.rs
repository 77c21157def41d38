use tracing::{debug, warn};

use super::{reduce, CartAction, CartItem, CartState};
use crate::snapshot;
use crate::storage::Storage;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&CartState)>;

/// Owns the cart state and keeps the snapshot slot in step with it.
///
/// Every dispatched action runs through the pure [`reduce`], then the whole
/// state is written to `storage` under `key`, then subscribers are notified.
/// Storage failures are logged and swallowed: the in-memory state stays
/// authoritative for the rest of the session.
///
/// The store is single-owner and not thread-safe; mutations are expected to
/// arrive one at a time from a single control flow.
pub struct CartStore<S: Storage> {
    state: CartState,
    storage: S,
    key: String,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl<S: Storage> CartStore<S> {
    /// Open the store, rehydrating from the snapshot under `key`.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = load_state(&storage, &key);
        Self {
            state,
            storage,
            key,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, dropping subscribers.
    pub fn into_parts(self) -> (CartState, S) {
        (self.state, self.storage)
    }

    /// Apply `action`, persist the snapshot, notify subscribers.
    pub fn dispatch(&mut self, action: CartAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action);
        debug!(?action, total = self.state.total_price(), "cart updated");
        self.persist();
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.state);
        }
    }

    pub fn add(&mut self, item: CartItem) {
        self.dispatch(CartAction::Add(item));
    }

    pub fn remove(&mut self, id: u64) {
        self.dispatch(CartAction::Remove(id));
    }

    pub fn set_quantity(&mut self, id: u64, quantity: i64) {
        self.dispatch(CartAction::SetQuantity { id, quantity });
    }

    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    /// One more unit of an existing line. Returns `false` for unknown ids,
    /// in which case nothing is dispatched.
    pub fn increment(&mut self, id: u64) -> bool {
        let Some(line) = self.state.line(id) else {
            return false;
        };
        let quantity = i64::from(line.quantity) + 1;
        self.set_quantity(id, quantity);
        true
    }

    /// One less unit, never dropping below 1; removing a line goes through
    /// [`CartStore::remove`]. Returns `false` when nothing was dispatched.
    pub fn decrement(&mut self, id: u64) -> bool {
        let Some(line) = self.state.line(id) else {
            return false;
        };
        if line.quantity <= 1 {
            return false;
        }
        let quantity = i64::from(line.quantity) - 1;
        self.set_quantity(id, quantity);
        true
    }

    /// Register `callback` to receive the new state after every mutation.
    pub fn subscribe(&mut self, callback: impl FnMut(&CartState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn persist(&mut self) {
        let data = match snapshot::serialize(&self.state) {
            Ok(data) => data,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to encode cart snapshot");
                return;
            }
        };
        if let Err(e) = self.storage.save(&self.key, &data) {
            warn!(key = %self.key, error = %e, "failed to save cart snapshot");
        }
    }
}

fn load_state<S: Storage>(storage: &S, key: &str) -> CartState {
    match storage.load(key) {
        Ok(Some(text)) => match snapshot::deserialize(&text) {
            Ok(state) => {
                debug!(key, lines = state.items().len(), "restored cart snapshot");
                state
            }
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable cart snapshot");
                CartState::new()
            }
        },
        Ok(None) => CartState::new(),
        Err(e) => {
            warn!(key, error = %e, "failed to read cart snapshot");
            CartState::new()
        }
    }
}
