use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::reducer::Reducer;
use crate::slices::auth::AuthAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Member,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserManagementState {
    pub users: Vec<ManagedUser>,
    pub selected: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UserManagementAction {
    FetchStarted,
    Loaded { users: Vec<ManagedUser> },
    Selected { id: String },
    Removed { id: String },
    Cleared,
}

impl UserManagementAction {
    pub fn kind(&self) -> &'static str {
        match self {
            UserManagementAction::FetchStarted => "userManagement/fetchStarted",
            UserManagementAction::Loaded { .. } => "userManagement/loaded",
            UserManagementAction::Selected { .. } => "userManagement/selected",
            UserManagementAction::Removed { .. } => "userManagement/removed",
            UserManagementAction::Cleared => "userManagement/cleared",
        }
    }
}

pub struct UserManagementReducer;

impl Reducer for UserManagementReducer {
    type State = UserManagementState;

    fn reduce(
        &self,
        state: UserManagementState,
        action: &Action,
    ) -> Result<UserManagementState, ReducerError> {
        let action = match action {
            Action::UserManagement(action) => action,
            Action::Auth(AuthAction::Logout) => return Ok(UserManagementState::default()),
            _ => return Ok(state),
        };

        Ok(match action {
            UserManagementAction::FetchStarted => UserManagementState {
                loading: true,
                ..state
            },
            UserManagementAction::Loaded { users } => {
                // Drop a selection that no longer exists in the new list.
                let selected = state
                    .selected
                    .filter(|id| users.iter().any(|u| &u.id == id));
                UserManagementState {
                    users: users.clone(),
                    selected,
                    loading: false,
                }
            }
            UserManagementAction::Selected { id } => {
                if state.users.iter().any(|u| &u.id == id) {
                    UserManagementState {
                        selected: Some(id.clone()),
                        ..state
                    }
                } else {
                    state
                }
            }
            UserManagementAction::Removed { id } => {
                let mut state = state;
                state.users.retain(|u| &u.id != id);
                if state.selected.as_ref() == Some(id) {
                    state.selected = None;
                }
                state
            }
            UserManagementAction::Cleared => UserManagementState::default(),
        })
    }
}
