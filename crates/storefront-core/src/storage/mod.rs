mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::CoreError;

/// Storage trait: named string slots, the local-storage model.
///
/// Implementations store raw strings. Encoding the cart is the snapshot
/// module's responsibility, so storage never depends on the cart types.
///
/// Implementations: in-memory map, one file per key on disk.
pub trait Storage {
    /// Write `data` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, data: &str) -> Result<(), CoreError>;

    /// Read the value stored under `key`. Returns `None` if nothing is stored.
    fn load(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// [`CartStore`](crate::cart::CartStore) never deletes its slot (clearing
    /// the cart writes an empty snapshot); this is for callers managing slots
    /// directly, such as discarding a cart under an old key.
    fn remove(&mut self, key: &str) -> Result<(), CoreError>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn save(&mut self, key: &str, data: &str) -> Result<(), CoreError> {
        (**self).save(key, data)
    }

    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).load(key)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn save(&mut self, key: &str, data: &str) -> Result<(), CoreError> {
        (**self).save(key, data)
    }

    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).load(key)
    }

    fn remove(&mut self, key: &str) -> Result<(), CoreError> {
        (**self).remove(key)
    }
}
