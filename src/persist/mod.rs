//! Selective durable persistence for the store.
//!
//! [`apply_persistence`] decorates the root reducer with lifecycle handling,
//! and a [`Persistor`] drives the storage backend: one read at startup
//! (rehydrate) and throttled, fire-and-forget writes of the whitelisted
//! slices afterwards.

pub mod config;
pub mod error;
pub mod persistor;
pub mod record;
pub mod reducer;
pub mod storage;

pub use config::{PersistConfig, KEY_PREFIX};
pub use error::{PersistError, StorageError};
pub use persistor::Persistor;
pub use record::PersistedRecord;
pub use reducer::{
    apply_persistence, PersistAction, PersistStatus, PersistedReducer, StoreState,
    LIFECYCLE_ACTIONS,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
