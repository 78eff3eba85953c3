use crate::app::state::SliceKey;
use thiserror::Error;

/// A slice reducer refused an action.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{slice} reducer rejected {action}: {reason}")]
pub struct ReducerError {
    pub slice: SliceKey,
    pub action: &'static str,
    pub reason: String,
}

impl ReducerError {
    pub fn new(slice: SliceKey, action: &'static str, reason: impl Into<String>) -> Self {
        Self {
            slice,
            action,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Reducer(#[from] ReducerError),

    #[error("action {action} is not serializable: {source}")]
    NotSerializable {
        action: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
