use crate::app::action::Action;
use crate::app::error::StoreError;
use crate::persist::LIFECYCLE_ACTIONS;

/// Development-time check that dispatched actions serialize to JSON.
/// Violations are reported, never fatal.
#[derive(Debug, Clone)]
pub struct SerializableCheck {
    enabled: bool,
    ignored_actions: Vec<&'static str>,
}

impl Default for SerializableCheck {
    /// Enabled in debug builds, ignoring the persistence lifecycle actions.
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            ignored_actions: LIFECYCLE_ACTIONS.to_vec(),
        }
    }
}

impl SerializableCheck {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ignored_actions: Vec::new(),
        }
    }

    pub fn ignoring(actions: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            enabled: true,
            ignored_actions: actions.into_iter().collect(),
        }
    }

    pub fn check(&self, action: &Action) -> Result<(), StoreError> {
        let kind = action.kind();
        if !self.enabled || self.ignored_actions.contains(&kind) {
            return Ok(());
        }
        serde_json::to_value(action)
            .map(|_| ())
            .map_err(|source| StoreError::NotSerializable { action: kind, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::PersistAction;
    use crate::slices::auth::AuthAction;

    #[test]
    fn test_lifecycle_actions_are_ignored_by_default() {
        let check = SerializableCheck::ignoring(LIFECYCLE_ACTIONS);
        let rehydrate = Action::from(PersistAction::Rehydrate {
            key: "root".into(),
            record: None,
            error: None,
        });
        assert!(check.check(&rehydrate).is_ok());
        assert!(check.check(&Action::from(AuthAction::login("u1"))).is_ok());
    }

    #[test]
    fn test_unignored_lifecycle_action_is_flagged() {
        let check = SerializableCheck::ignoring([]);
        let err = check.check(&Action::from(PersistAction::Pause)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotSerializable { action: "persist/PAUSE", .. }
        ));
    }

    #[test]
    fn test_disabled_check_accepts_everything() {
        let check = SerializableCheck::disabled();
        assert!(check.check(&Action::from(PersistAction::Flush)).is_ok());
    }
}
