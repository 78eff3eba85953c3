use crate::app::state::SliceKey;
use crate::persist::record::PersistedRecord;
use crate::persist::storage::Storage;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Prefix prepended to the namespace to form the storage key.
pub const KEY_PREFIX: &str = "persist:";
pub const DEFAULT_VERSION: u32 = 1;

/// Upgrades a record written under an older schema version. Receives the
/// record and the version it was written with.
pub type MigrateFn = Arc<dyn Fn(PersistedRecord, u32) -> PersistedRecord + Send + Sync>;

#[derive(Clone)]
pub struct PersistConfig {
    pub key: String,
    pub version: u32,
    pub storage: Arc<dyn Storage>,
    pub whitelist: Vec<SliceKey>,
    /// Minimum delay between a state change and its write-back.
    pub throttle: Duration,
    pub migrate: Option<MigrateFn>,
}

impl PersistConfig {
    pub fn new(key: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        Self {
            key: key.into(),
            version: DEFAULT_VERSION,
            storage,
            whitelist: vec![SliceKey::Auth],
            throttle: Duration::ZERO,
            migrate: None,
        }
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_whitelist(mut self, whitelist: impl IntoIterator<Item = SliceKey>) -> Self {
        self.whitelist.clear();
        for key in whitelist {
            if !self.whitelist.contains(&key) {
                self.whitelist.push(key);
            }
        }
        self
    }

    pub fn with_throttle(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn with_migrate(
        mut self,
        migrate: impl Fn(PersistedRecord, u32) -> PersistedRecord + Send + Sync + 'static,
    ) -> Self {
        self.migrate = Some(Arc::new(migrate));
        self
    }

    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.key)
    }

    pub fn is_whitelisted(&self, key: SliceKey) -> bool {
        self.whitelist.contains(&key)
    }
}

impl fmt::Debug for PersistConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistConfig")
            .field("key", &self.key)
            .field("version", &self.version)
            .field("whitelist", &self.whitelist)
            .field("throttle", &self.throttle)
            .field("migrate", &self.migrate.is_some())
            .finish_non_exhaustive()
    }
}
