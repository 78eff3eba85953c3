use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::state::RootState;
use crate::slices::auth::AuthReducer;
use crate::slices::campaigns::CampaignsReducer;
use crate::slices::collaboration::CollaborationReducer;
use crate::slices::company_dashboard::CompanyDashboardReducer;
use crate::slices::dashboard::DashboardReducer;
use crate::slices::user_management::UserManagementReducer;

/// A pure state transition. Implementations must return `state` untouched
/// for actions they do not handle.
pub trait Reducer {
    type State;

    fn reduce(&self, state: Self::State, action: &Action) -> Result<Self::State, ReducerError>;
}

/// Runs every slice reducer on its own slice and reassembles the results.
#[derive(Debug, Clone, Copy)]
pub struct RootReducer {
    auth: AuthReducer,
}

impl RootReducer {
    pub fn auth_variant(&self) -> AuthReducer {
        self.auth
    }
}

/// Build the root reducer. The auth variant is fixed here for the lifetime of
/// the reducer.
pub fn compose_root_reducer(auth: AuthReducer) -> RootReducer {
    RootReducer { auth }
}

impl Reducer for RootReducer {
    type State = RootState;

    fn reduce(&self, state: RootState, action: &Action) -> Result<RootState, ReducerError> {
        let RootState {
            auth,
            user_management,
            dashboard,
            campaigns,
            collaboration,
            company_dashboard,
        } = state;

        Ok(RootState {
            auth: self.auth.reduce(auth, action)?,
            user_management: UserManagementReducer.reduce(user_management, action)?,
            dashboard: DashboardReducer.reduce(dashboard, action)?,
            campaigns: CampaignsReducer.reduce(campaigns, action)?,
            collaboration: CollaborationReducer.reduce(collaboration, action)?,
            company_dashboard: CompanyDashboardReducer.reduce(company_dashboard, action)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::PersistAction;
    use crate::slices::auth::AuthAction;
    use crate::slices::campaigns::{Campaign, CampaignStatus, CampaignsAction};
    use crate::slices::dashboard::DashboardAction;
    use chrono::Utc;

    fn populated() -> RootState {
        let root = compose_root_reducer(AuthReducer::Native);
        let actions = [
            Action::from(AuthAction::login("u1")),
            Action::from(DashboardAction::Refreshed {
                widgets: vec!["reach".into()],
                at: Utc::now(),
            }),
            Action::from(CampaignsAction::Upserted {
                campaign: Campaign {
                    id: "c1".into(),
                    name: "Spring".into(),
                    status: CampaignStatus::Active,
                    budget: 250.0,
                },
            }),
        ];
        actions
            .iter()
            .try_fold(RootState::default(), |state, action| root.reduce(state, action))
            .unwrap()
    }

    #[test]
    fn test_unhandled_action_leaves_every_slice_unchanged() {
        let root = compose_root_reducer(AuthReducer::Native);
        let before = populated();
        // Lifecycle actions are not addressed to any slice.
        let after = root
            .reduce(before.clone(), &Action::from(PersistAction::Flush))
            .unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn test_action_only_touches_its_slice() {
        let root = compose_root_reducer(AuthReducer::Native);
        let before = populated();
        let after = root
            .reduce(
                before.clone(),
                &Action::from(DashboardAction::WidgetRemoved { id: "reach".into() }),
            )
            .unwrap();
        assert!(after.dashboard.widgets.is_empty());
        assert_eq!(after.auth, before.auth);
        assert_eq!(after.campaigns, before.campaigns);
        assert_eq!(after.user_management, before.user_management);
    }

    #[test]
    fn test_logout_resets_session_slices() {
        let root = compose_root_reducer(AuthReducer::Native);
        let after = root
            .reduce(populated(), &Action::from(AuthAction::Logout))
            .unwrap();
        assert_eq!(after, RootState::default());
    }

    #[test]
    fn test_auth_variant_follows_platform() {
        use crate::config::Platform;
        let web = compose_root_reducer(AuthReducer::for_platform(Platform::Web));
        assert_eq!(web.auth_variant(), AuthReducer::Web);
        let ios = compose_root_reducer(AuthReducer::for_platform(Platform::Ios));
        assert_eq!(ios.auth_variant(), AuthReducer::Native);
    }

    #[test]
    fn test_slice_error_propagates() {
        let root = compose_root_reducer(AuthReducer::Web);
        let err = root
            .reduce(RootState::default(), &Action::from(AuthAction::login("")))
            .unwrap_err();
        assert_eq!(err.action, "auth/login");
    }
}
