use crate::slices::auth::AuthState;
use crate::slices::campaigns::CampaignsState;
use crate::slices::collaboration::CollaborationState;
use crate::slices::company_dashboard::CompanyDashboardState;
use crate::slices::dashboard::DashboardState;
use crate::slices::user_management::UserManagementState;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Names one of the six fixed partitions of [`RootState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SliceKey {
    Auth,
    UserManagement,
    Dashboard,
    Campaigns,
    Collaboration,
    CompanyDashboard,
}

impl SliceKey {
    pub const ALL: [SliceKey; 6] = [
        SliceKey::Auth,
        SliceKey::UserManagement,
        SliceKey::Dashboard,
        SliceKey::Campaigns,
        SliceKey::Collaboration,
        SliceKey::CompanyDashboard,
    ];

    /// Key used for this slice in serialized state and persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            SliceKey::Auth => "auth",
            SliceKey::UserManagement => "userManagement",
            SliceKey::Dashboard => "dashboard",
            SliceKey::Campaigns => "campaigns",
            SliceKey::Collaboration => "collaboration",
            SliceKey::CompanyDashboard => "companyDashboard",
        }
    }
}

impl fmt::Display for SliceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SliceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown slice key '{}'", s))
    }
}

/// The whole client state tree. The field set is fixed; each field's type is
/// owned by the slice module of the same name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RootState {
    pub auth: AuthState,
    pub user_management: UserManagementState,
    pub dashboard: DashboardState,
    pub campaigns: CampaignsState,
    pub collaboration: CollaborationState,
    pub company_dashboard: CompanyDashboardState,
}

impl RootState {
    /// Serialize a single slice to JSON.
    pub fn slice_json(&self, key: SliceKey) -> Result<Value, serde_json::Error> {
        match key {
            SliceKey::Auth => serde_json::to_value(&self.auth),
            SliceKey::UserManagement => serde_json::to_value(&self.user_management),
            SliceKey::Dashboard => serde_json::to_value(&self.dashboard),
            SliceKey::Campaigns => serde_json::to_value(&self.campaigns),
            SliceKey::Collaboration => serde_json::to_value(&self.collaboration),
            SliceKey::CompanyDashboard => serde_json::to_value(&self.company_dashboard),
        }
    }

    /// Overlay `incoming` onto the current value of slice `key`. Top-level
    /// fields present in `incoming` replace the current ones; absent fields
    /// keep their current value.
    pub fn merge_slice(&mut self, key: SliceKey, incoming: &Value) -> Result<(), serde_json::Error> {
        match key {
            SliceKey::Auth => self.auth = merge_fields(&self.auth, incoming)?,
            SliceKey::UserManagement => {
                self.user_management = merge_fields(&self.user_management, incoming)?
            }
            SliceKey::Dashboard => self.dashboard = merge_fields(&self.dashboard, incoming)?,
            SliceKey::Campaigns => self.campaigns = merge_fields(&self.campaigns, incoming)?,
            SliceKey::Collaboration => {
                self.collaboration = merge_fields(&self.collaboration, incoming)?
            }
            SliceKey::CompanyDashboard => {
                self.company_dashboard = merge_fields(&self.company_dashboard, incoming)?
            }
        }
        Ok(())
    }

    /// Reset slice `key` to its default value.
    pub fn reset_slice(&mut self, key: SliceKey) {
        match key {
            SliceKey::Auth => self.auth = AuthState::default(),
            SliceKey::UserManagement => self.user_management = UserManagementState::default(),
            SliceKey::Dashboard => self.dashboard = DashboardState::default(),
            SliceKey::Campaigns => self.campaigns = CampaignsState::default(),
            SliceKey::Collaboration => self.collaboration = CollaborationState::default(),
            SliceKey::CompanyDashboard => self.company_dashboard = CompanyDashboardState::default(),
        }
    }
}

fn merge_fields<T>(current: &T, incoming: &Value) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let mut merged = serde_json::to_value(current)?;
    match (&mut merged, incoming) {
        (Value::Object(base), Value::Object(fields)) => {
            for (name, value) in fields {
                base.insert(name.clone(), value.clone());
            }
        }
        (base, other) => *base = other.clone(),
    }
    serde_json::from_value(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slice_key_round_trips_through_str() {
        for key in SliceKey::ALL {
            assert_eq!(key.as_str().parse::<SliceKey>(), Ok(key));
        }
        assert!("profile".parse::<SliceKey>().is_err());
    }

    #[test]
    fn test_root_state_uses_fixed_keys() {
        let value = serde_json::to_value(RootState::default()).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        let mut expected: Vec<_> = SliceKey::ALL.iter().map(|k| k.as_str().to_string()).collect();
        expected.sort();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_merge_slice_keeps_fields_missing_from_incoming() {
        let mut state = RootState::default();
        state.auth.display_name = Some("Ada".into());
        state
            .merge_slice(SliceKey::Auth, &json!({ "userId": "u1" }))
            .unwrap();
        assert_eq!(state.auth.user_id.as_deref(), Some("u1"));
        assert_eq!(state.auth.display_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_merge_slice_rejects_mistyped_fields() {
        let mut state = RootState::default();
        let err = state.merge_slice(SliceKey::Auth, &json!({ "userId": 42 }));
        assert!(err.is_err());
        assert_eq!(state.auth, AuthState::default());
    }

    #[test]
    fn test_reset_slice_only_touches_that_slice() {
        let mut state = RootState::default();
        state.auth.user_id = Some("u1".into());
        state.dashboard.widgets = vec!["revenue".into()];
        state.reset_slice(SliceKey::Auth);
        assert_eq!(state.auth, AuthState::default());
        assert_eq!(state.dashboard.widgets, vec!["revenue".to_string()]);
    }
}
