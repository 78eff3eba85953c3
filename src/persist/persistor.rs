//! Persistence controller.
//!
//! A [`Persistor`] watches the store for changes to whitelisted slices and
//! hands snapshots to a background writer task. The writer coalesces
//! snapshots that arrive within the throttle window and writes only the
//! newest, so writes from one persistor are serialized and the last one wins.
//! Write failures are logged and dropped.
//!
//! Startup rehydration is the only read: [`Persistor::rehydrate`] suspends
//! until storage answers, then dispatches `Rehydrate`. Until that resolves,
//! `auth` holds its default value and nothing is written back.

use crate::app::store::{Store, SubscriptionId};
use crate::persist::config::PersistConfig;
use crate::persist::error::PersistError;
use crate::persist::record::PersistedRecord;
use crate::persist::reducer::PersistAction;
use crate::persist::storage::Storage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

enum WriteRequest {
    Save(PersistedRecord),
    Flush(oneshot::Sender<Result<(), PersistError>>),
    Purge(oneshot::Sender<Result<(), PersistError>>),
}

pub struct Persistor {
    config: PersistConfig,
    writes: mpsc::UnboundedSender<WriteRequest>,
    subscription: SubscriptionId,
    writer: JoinHandle<()>,
}

impl Persistor {
    /// Attach persistence to `store`: start the writer task, subscribe to
    /// state changes and dispatch `Register` then `Persist`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(store: &mut Store) -> Result<Self, PersistError> {
        let config = store.persist_config().clone();
        let (writes, rx) = mpsc::unbounded_channel();

        let writer = tokio::spawn(run_writer(
            config.storage.clone(),
            config.storage_key(),
            config.throttle,
            rx,
        ));

        let tx = writes.clone();
        let whitelist = config.whitelist.clone();
        let version = config.version;
        let mut last_sent: Option<PersistedRecord> = None;
        let mut seeded = false;
        let subscription = store.subscribe(move |state| {
            if !state.persist.rehydrated {
                return;
            }
            // The first rehydrated state matches what storage already holds.
            let first = !seeded;
            seeded = true;
            if state.persist.paused || !state.persist.write_back {
                return;
            }
            let record = match PersistedRecord::capture(&state.root, &whitelist, version) {
                Ok(record) => record,
                Err(e) => {
                    warn!(error = %e, "could not snapshot persisted slices");
                    return;
                }
            };
            if first {
                last_sent = Some(record);
                return;
            }
            if last_sent.as_ref() == Some(&record) {
                return;
            }
            last_sent = Some(record.clone());
            let _ = tx.send(WriteRequest::Save(record));
        });

        store.dispatch(PersistAction::Register {
            key: config.key.clone(),
        })?;
        store.dispatch(PersistAction::Persist {
            key: config.key.clone(),
        })?;

        Ok(Self {
            config,
            writes,
            subscription,
            writer,
        })
    }

    /// Read the persisted record without touching the store.
    pub async fn load(&self) -> Result<Option<PersistedRecord>, PersistError> {
        let key = self.config.storage_key();
        let raw = self.config.storage.get_item(&key).await?;
        raw.map(|raw| PersistedRecord::from_json(&key, &raw))
            .transpose()
    }

    /// Dispatch `Rehydrate` for the outcome of [`load`](Self::load). A failed
    /// read still rehydrates (with defaults) and the error is returned.
    pub fn apply_rehydrate(
        &self,
        store: &mut Store,
        loaded: Result<Option<PersistedRecord>, PersistError>,
    ) -> Result<(), PersistError> {
        let (record, outcome) = match loaded {
            Ok(record) => (record, Ok(())),
            Err(e) => (None, Err(e)),
        };
        let error = outcome.as_ref().err().map(ToString::to_string);
        let found = record.is_some();

        store.dispatch(PersistAction::Rehydrate {
            key: self.config.key.clone(),
            record,
            error,
        })?;
        info!(key = %self.config.key, found, "store rehydrated");
        outcome
    }

    /// Startup trigger: read storage, then rehydrate the store.
    pub async fn rehydrate(&self, store: &mut Store) -> Result<(), PersistError> {
        let loaded = self.load().await;
        self.apply_rehydrate(store, loaded)
    }

    /// Write any pending snapshot now.
    pub async fn flush(&self, store: &mut Store) -> Result<(), PersistError> {
        store.dispatch(PersistAction::Flush)?;
        self.request(WriteRequest::Flush).await
    }

    /// Stop writing state changes until [`resume`](Self::resume).
    pub fn pause(&self, store: &mut Store) -> Result<(), PersistError> {
        store.dispatch(PersistAction::Pause)?;
        Ok(())
    }

    /// Re-enable writing. Also the caller's opt-in to overwrite the durable
    /// record after a failed or discarded startup read.
    pub fn resume(&self, store: &mut Store) -> Result<(), PersistError> {
        store.dispatch(PersistAction::Persist {
            key: self.config.key.clone(),
        })?;
        Ok(())
    }

    /// Reset whitelisted slices in the store and remove the durable record.
    /// The live reset happens even if storage fails.
    pub async fn purge(&self, store: &mut Store) -> Result<(), PersistError> {
        store.dispatch(PersistAction::Purge {
            key: self.config.key.clone(),
        })?;
        self.request(WriteRequest::Purge).await?;
        info!(key = %self.config.key, "persisted state purged");
        Ok(())
    }

    /// Flush, detach from the store and wait for the writer to finish.
    pub async fn shutdown(self, store: &mut Store) -> Result<(), PersistError> {
        let flushed = self.flush(store).await;
        store.unsubscribe(self.subscription);
        drop(self.writes);
        let joined = self.writer.await;
        flushed?;
        joined.map_err(|e| {
            warn!(key = %self.config.key, error = %e, "persistence writer task failed");
            PersistError::WriterClosed
        })
    }

    async fn request(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<(), PersistError>>) -> WriteRequest,
    ) -> Result<(), PersistError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.writes
            .send(make(reply_tx))
            .map_err(|_| PersistError::WriterClosed)?;
        reply_rx.await.map_err(|_| PersistError::WriterClosed)?
    }
}

async fn run_writer(
    storage: Arc<dyn Storage>,
    key: String,
    throttle: Duration,
    mut rx: mpsc::UnboundedReceiver<WriteRequest>,
) {
    let mut pending: Option<(PersistedRecord, Instant)> = None;

    loop {
        let deadline = pending.as_ref().map(|(_, deadline)| *deadline);
        let request = match deadline {
            Some(deadline) => match tokio::time::timeout_at(deadline, rx.recv()).await {
                Ok(request) => request,
                Err(_) => {
                    if let Some((record, _)) = pending.take() {
                        write_or_warn(storage.as_ref(), &key, &record).await;
                    }
                    continue;
                }
            },
            None => rx.recv().await,
        };

        let Some(request) = request else {
            // Store and persistor are gone; don't lose the last change.
            if let Some((record, _)) = pending.take() {
                write_or_warn(storage.as_ref(), &key, &record).await;
            }
            break;
        };

        match request {
            WriteRequest::Save(record) => {
                let deadline = match pending.take() {
                    Some((_, deadline)) => deadline,
                    None => Instant::now() + throttle,
                };
                pending = Some((record, deadline));
            }
            WriteRequest::Flush(reply) => {
                let result = match pending.take() {
                    Some((record, _)) => write(storage.as_ref(), &key, &record).await,
                    None => Ok(()),
                };
                let _ = reply.send(result);
            }
            WriteRequest::Purge(reply) => {
                pending = None;
                let result = storage.remove_item(&key).await.map_err(PersistError::from);
                let _ = reply.send(result);
            }
        }
    }
    debug!(key = %key, "persistence writer stopped");
}

async fn write(
    storage: &dyn Storage,
    key: &str,
    record: &PersistedRecord,
) -> Result<(), PersistError> {
    let raw = record.to_json()?;
    storage.set_item(key, raw).await?;
    debug!(key, "persisted state written");
    Ok(())
}

async fn write_or_warn(
    storage: &dyn Storage,
    key: &str,
    record: &PersistedRecord,
) {
    if let Err(e) = write(storage, key, record).await {
        warn!(key, error = %e, "dropping failed write-back");
    }
}
