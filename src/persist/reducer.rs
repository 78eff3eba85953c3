use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::reducer::{Reducer, RootReducer};
use crate::app::state::RootState;
use crate::persist::config::PersistConfig;
use crate::persist::record::PersistedRecord;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{info, warn};

pub const REHYDRATE: &str = "persist/REHYDRATE";
pub const FLUSH: &str = "persist/FLUSH";
pub const PAUSE: &str = "persist/PAUSE";
pub const PERSIST: &str = "persist/PERSIST";
pub const PURGE: &str = "persist/PURGE";
pub const REGISTER: &str = "persist/REGISTER";

/// Type strings of every persistence lifecycle action.
pub const LIFECYCLE_ACTIONS: [&str; 6] = [REHYDRATE, FLUSH, PAUSE, PERSIST, PURGE, REGISTER];

/// Lifecycle actions intercepted by [`PersistedReducer`]. Keyed variants are
/// ignored unless the key matches the reducer's namespace.
#[derive(Debug, Clone)]
pub enum PersistAction {
    /// Result of the startup read. `record` is `None` when nothing was stored
    /// or the read failed; `error` carries the failure message.
    Rehydrate {
        key: String,
        record: Option<PersistedRecord>,
        error: Option<String>,
    },
    Flush,
    Pause,
    Persist {
        key: String,
    },
    Purge {
        key: String,
    },
    Register {
        key: String,
    },
}

impl PersistAction {
    pub fn kind(&self) -> &'static str {
        match self {
            PersistAction::Rehydrate { .. } => REHYDRATE,
            PersistAction::Flush => FLUSH,
            PersistAction::Pause => PAUSE,
            PersistAction::Persist { .. } => PERSIST,
            PersistAction::Purge { .. } => PURGE,
            PersistAction::Register { .. } => REGISTER,
        }
    }
}

/// Persistence bookkeeping kept next to the root state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistStatus {
    pub version: u32,
    pub rehydrated: bool,
    pub paused: bool,
    pub registered: bool,
    /// Whether state changes may overwrite the durable record. Cleared when
    /// the startup read failed or its record was discarded, so a fallback to
    /// defaults never replaces the stored session. `Persist` (resume) sets it.
    pub write_back: bool,
}

/// Everything the store holds: the root tree plus persistence status.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    pub root: RootState,
    pub persist: PersistStatus,
}

/// Root reducer decorated with rehydrate/purge handling.
#[derive(Debug, Clone)]
pub struct PersistedReducer {
    root: RootReducer,
    config: PersistConfig,
}

pub fn apply_persistence(root: RootReducer, config: PersistConfig) -> PersistedReducer {
    PersistedReducer { root, config }
}

impl PersistedReducer {
    pub fn config(&self) -> &PersistConfig {
        &self.config
    }

    pub fn initial_state(&self) -> StoreState {
        StoreState {
            root: RootState::default(),
            persist: PersistStatus {
                version: self.config.version,
                rehydrated: false,
                paused: false,
                registered: false,
                write_back: false,
            },
        }
    }

    fn owns(&self, key: &str) -> bool {
        key == self.config.key
    }

    fn reconcile_version(&self, record: PersistedRecord) -> Option<PersistedRecord> {
        let stored = record.version;
        let expected = self.config.version;
        match stored.cmp(&expected) {
            Ordering::Equal => Some(record),
            Ordering::Less => match &self.config.migrate {
                Some(migrate) => {
                    info!(stored, expected, "migrating persisted record");
                    let mut migrated = migrate(record, stored);
                    migrated.version = expected;
                    Some(migrated)
                }
                None => Some(record),
            },
            Ordering::Greater => {
                warn!(stored, expected, "discarding persisted record written by a newer schema");
                None
            }
        }
    }

    fn merge_record(&self, root: &mut RootState, record: &PersistedRecord) {
        for key in &self.config.whitelist {
            let Some(value) = record.slice(*key) else {
                continue;
            };
            if let Err(e) = root.merge_slice(*key, value) {
                warn!(slice = %key, error = %e, "skipping unreadable persisted slice");
            }
        }
    }
}

impl Reducer for PersistedReducer {
    type State = StoreState;

    fn reduce(&self, state: StoreState, action: &Action) -> Result<StoreState, ReducerError> {
        let StoreState { mut root, mut persist } = state;

        let Action::Persist(lifecycle) = action else {
            return Ok(StoreState {
                root: self.root.reduce(root, action)?,
                persist,
            });
        };

        match lifecycle {
            PersistAction::Rehydrate { key, record, error } if self.owns(key) => {
                if let Some(error) = error {
                    warn!(key = %key, error = %error, "rehydrating with defaults after failed read");
                }
                let usable = record.clone().map(|r| self.reconcile_version(r));
                if let Some(Some(record)) = &usable {
                    self.merge_record(&mut root, record);
                }
                let discarded = matches!(usable, Some(None));
                persist.rehydrated = true;
                persist.write_back = error.is_none() && !discarded;
                if !persist.write_back {
                    warn!(key = %key, "write-back suspended until resumed");
                }
            }
            PersistAction::Persist { key } if self.owns(key) => {
                persist.paused = false;
                persist.write_back = true;
            }
            PersistAction::Register { key } if self.owns(key) => persist.registered = true,
            PersistAction::Purge { key } if self.owns(key) => {
                for slice in &self.config.whitelist {
                    root.reset_slice(*slice);
                }
            }
            PersistAction::Pause => persist.paused = true,
            // Flushing is a writer concern; other namespaces are not ours.
            _ => {}
        }

        Ok(StoreState { root, persist })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::reducer::compose_root_reducer;
    use crate::app::state::SliceKey;
    use crate::persist::storage::MemoryStorage;
    use crate::slices::auth::{AuthAction, AuthReducer, AuthState, AuthStatus};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn reducer(config: PersistConfig) -> PersistedReducer {
        apply_persistence(compose_root_reducer(AuthReducer::Native), config)
    }

    fn config() -> PersistConfig {
        PersistConfig::new("root", Arc::new(MemoryStorage::new()))
    }

    fn record(version: u32, slices: serde_json::Value) -> PersistedRecord {
        let slices: BTreeMap<String, serde_json::Value> = serde_json::from_value(slices).unwrap();
        PersistedRecord { version, slices }
    }

    fn rehydrate(record: Option<PersistedRecord>) -> Action {
        Action::Persist(PersistAction::Rehydrate {
            key: "root".into(),
            record,
            error: None,
        })
    }

    #[test]
    fn test_rehydrate_merges_persisted_fields_over_defaults() {
        let reducer = reducer(config());
        let state = reducer
            .reduce(
                reducer.initial_state(),
                &rehydrate(Some(record(
                    1,
                    json!({ "auth": { "userId": "u1", "status": "authenticated" } }),
                ))),
            )
            .unwrap();
        assert_eq!(state.root.auth.user_id.as_deref(), Some("u1"));
        assert_eq!(state.root.auth.status, AuthStatus::Authenticated);
        assert_eq!(state.root.auth.access_token, None);
        assert!(state.persist.rehydrated);
        assert!(state.persist.write_back);
    }

    #[test]
    fn test_resume_after_failed_read_enables_write_back() {
        let reducer = reducer(config());
        let failed = Action::Persist(PersistAction::Rehydrate {
            key: "root".into(),
            record: None,
            error: Some("timeout".into()),
        });
        let state = reducer.reduce(reducer.initial_state(), &failed).unwrap();
        assert!(!state.persist.write_back);
        let state = reducer
            .reduce(
                state,
                &Action::Persist(PersistAction::Persist { key: "root".into() }),
            )
            .unwrap();
        assert!(state.persist.write_back);
    }

    #[test]
    fn test_rehydrate_ignores_non_whitelisted_slices() {
        let reducer = reducer(config());
        let state = reducer
            .reduce(
                reducer.initial_state(),
                &rehydrate(Some(record(
                    1,
                    json!({
                        "auth": { "userId": "u1" },
                        "dashboard": { "widgets": ["injected"] },
                        "campaigns": { "loading": true }
                    }),
                ))),
            )
            .unwrap();
        let mut expected = RootState::default();
        expected.auth = state.root.auth.clone();
        assert_eq!(state.root, expected);
    }

    #[test]
    fn test_rehydrate_for_other_namespace_is_ignored() {
        let reducer = reducer(config());
        let action = Action::Persist(PersistAction::Rehydrate {
            key: "other".into(),
            record: Some(record(1, json!({ "auth": { "userId": "u1" } }))),
            error: None,
        });
        let state = reducer.reduce(reducer.initial_state(), &action).unwrap();
        assert_eq!(state, reducer.initial_state());
    }

    #[test]
    fn test_failed_read_still_marks_rehydrated() {
        let reducer = reducer(config());
        let action = Action::Persist(PersistAction::Rehydrate {
            key: "root".into(),
            record: None,
            error: Some("disk on fire".into()),
        });
        let state = reducer.reduce(reducer.initial_state(), &action).unwrap();
        assert!(state.persist.rehydrated);
        assert!(!state.persist.write_back);
        assert_eq!(state.root, RootState::default());
    }

    #[test]
    fn test_newer_schema_is_discarded() {
        let reducer = reducer(config().with_version(2));
        let state = reducer
            .reduce(
                reducer.initial_state(),
                &rehydrate(Some(record(3, json!({ "auth": { "userId": "u1" } })))),
            )
            .unwrap();
        assert_eq!(state.root.auth.user_id, None);
        assert!(state.persist.rehydrated);
        assert!(!state.persist.write_back);
    }

    #[test]
    fn test_older_schema_is_migrated() {
        let reducer = reducer(config().with_version(2).with_migrate(|mut record, from| {
            assert_eq!(from, 1);
            // v1 stored the id as "uid".
            if let Some(auth) = record.slices.get_mut("auth").and_then(|v| v.as_object_mut()) {
                if let Some(uid) = auth.remove("uid") {
                    auth.insert("userId".into(), uid);
                }
            }
            record
        }));
        let state = reducer
            .reduce(
                reducer.initial_state(),
                &rehydrate(Some(record(1, json!({ "auth": { "uid": "u1" } })))),
            )
            .unwrap();
        assert_eq!(state.root.auth.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_purge_resets_whitelisted_slices_only() {
        let reducer = reducer(config());
        let state = reducer
            .reduce(reducer.initial_state(), &Action::from(AuthAction::login("u1")))
            .unwrap();
        let mut state = state;
        state.root.dashboard.widgets = vec!["reach".into()];

        let purged = reducer
            .reduce(
                state,
                &Action::Persist(PersistAction::Purge { key: "root".into() }),
            )
            .unwrap();
        assert_eq!(purged.root.auth, AuthState::default());
        assert_eq!(purged.root.dashboard.widgets, vec!["reach".to_string()]);
    }

    #[test]
    fn test_pause_and_persist_toggle_writes() {
        let reducer = reducer(config());
        let state = reducer
            .reduce(reducer.initial_state(), &Action::Persist(PersistAction::Pause))
            .unwrap();
        assert!(state.persist.paused);
        let state = reducer
            .reduce(
                state,
                &Action::Persist(PersistAction::Persist { key: "root".into() }),
            )
            .unwrap();
        assert!(!state.persist.paused);
    }

    #[test]
    fn test_whitelist_can_include_more_slices() {
        let reducer = reducer(config().with_whitelist([SliceKey::Auth, SliceKey::Campaigns]));
        let state = reducer
            .reduce(
                reducer.initial_state(),
                &rehydrate(Some(record(
                    1,
                    json!({ "campaigns": { "filter": { "only": "active" } } }),
                ))),
            )
            .unwrap();
        assert_eq!(
            state.root.campaigns.filter,
            crate::slices::campaigns::CampaignFilter::Only(
                crate::slices::campaigns::CampaignStatus::Active
            )
        );
    }
}
