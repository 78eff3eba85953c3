//! Process-wide wiring: one store plus its persistor, built from config.

use crate::app::action::Action;
use crate::app::error::StoreError;
use crate::app::middleware::SerializableCheck;
use crate::app::reducer::compose_root_reducer;
use crate::app::state::RootState;
use crate::app::store::{create_store, Store};
use crate::config::{AppConfig, PersistSettings};
use crate::persist::storage::default_storage_dir;
use crate::persist::{apply_persistence, FileStorage, PersistConfig, PersistError, Persistor, Storage};
use crate::slices::auth::AuthReducer;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct AppContext {
    pub store: Store,
    pub persistor: Persistor,
}

/// File-backed storage at the configured directory, or the platform default.
pub fn file_storage(settings: &PersistSettings) -> FileStorage {
    let root = settings
        .storage_dir
        .clone()
        .unwrap_or_else(default_storage_dir);
    FileStorage::new(root)
}

pub fn persist_config(settings: &PersistSettings, storage: Arc<dyn Storage>) -> PersistConfig {
    PersistConfig::new(settings.key.clone(), storage)
        .with_version(settings.version)
        .with_whitelist(settings.whitelist.iter().copied())
        .with_throttle(Duration::from_millis(settings.throttle_ms))
}

impl AppContext {
    /// Build the store and attach persistence. Must run inside a tokio
    /// runtime. The store is not rehydrated until [`start`](Self::start).
    pub fn new(config: &AppConfig, storage: Arc<dyn Storage>) -> Result<Self, PersistError> {
        let root = compose_root_reducer(AuthReducer::for_platform(config.platform));
        debug!(platform = ?config.platform, auth = ?root.auth_variant(), "composing store");

        let reducer = apply_persistence(root, persist_config(&config.persist, storage));
        let mut store = create_store(reducer, SerializableCheck::default());
        let persistor = Persistor::new(&mut store)?;
        Ok(Self { store, persistor })
    }

    pub async fn start(&mut self) -> Result<(), PersistError> {
        self.persistor.rehydrate(&mut self.store).await
    }

    pub fn state(&self) -> &RootState {
        self.store.get_state()
    }

    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<Action, StoreError> {
        self.store.dispatch(action)
    }

    /// Allow writes again, including over a record the startup read could
    /// not use.
    pub fn resume(&mut self) -> Result<(), PersistError> {
        self.persistor.resume(&mut self.store)
    }

    pub async fn flush(&mut self) -> Result<(), PersistError> {
        self.persistor.flush(&mut self.store).await
    }

    pub async fn purge(&mut self) -> Result<(), PersistError> {
        self.persistor.purge(&mut self.store).await
    }

    /// Flush pending writes and stop the writer. Returns the final state.
    pub async fn shutdown(self) -> Result<RootState, PersistError> {
        let AppContext {
            mut store,
            persistor,
        } = self;
        persistor.shutdown(&mut store).await?;
        Ok(store.get_state().clone())
    }
}
