use crate::persist::PersistAction;
use crate::slices::auth::AuthAction;
use crate::slices::campaigns::CampaignsAction;
use crate::slices::collaboration::CollaborationAction;
use crate::slices::company_dashboard::CompanyDashboardAction;
use crate::slices::dashboard::DashboardAction;
use crate::slices::user_management::UserManagementAction;
use serde::Serialize;

/// Everything that can be dispatched to the store.
///
/// Slice actions serialize as `{"slice": "...", "action": {"type": "...", ...}}`.
/// Persistence lifecycle actions carry runtime-only payloads and refuse to
/// serialize.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "slice", content = "action", rename_all = "camelCase")]
pub enum Action {
    Auth(AuthAction),
    UserManagement(UserManagementAction),
    Dashboard(DashboardAction),
    Campaigns(CampaignsAction),
    Collaboration(CollaborationAction),
    CompanyDashboard(CompanyDashboardAction),
    #[serde(skip)]
    Persist(PersistAction),
}

impl Action {
    /// Type string in `slice/name` form, used for logging and middleware filters.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Auth(a) => a.kind(),
            Action::UserManagement(a) => a.kind(),
            Action::Dashboard(a) => a.kind(),
            Action::Campaigns(a) => a.kind(),
            Action::Collaboration(a) => a.kind(),
            Action::CompanyDashboard(a) => a.kind(),
            Action::Persist(a) => a.kind(),
        }
    }

    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Action::Persist(_))
    }
}

impl From<AuthAction> for Action {
    fn from(action: AuthAction) -> Self {
        Action::Auth(action)
    }
}

impl From<UserManagementAction> for Action {
    fn from(action: UserManagementAction) -> Self {
        Action::UserManagement(action)
    }
}

impl From<DashboardAction> for Action {
    fn from(action: DashboardAction) -> Self {
        Action::Dashboard(action)
    }
}

impl From<CampaignsAction> for Action {
    fn from(action: CampaignsAction) -> Self {
        Action::Campaigns(action)
    }
}

impl From<CollaborationAction> for Action {
    fn from(action: CollaborationAction) -> Self {
        Action::Collaboration(action)
    }
}

impl From<CompanyDashboardAction> for Action {
    fn from(action: CompanyDashboardAction) -> Self {
        Action::CompanyDashboard(action)
    }
}

impl From<PersistAction> for Action {
    fn from(action: PersistAction) -> Self {
        Action::Persist(action)
    }
}
