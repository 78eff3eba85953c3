//! Authentication slice.
//!
//! Two variants share one reducer interface: [`AuthReducer::Native`] keeps the
//! full token pair in state, [`AuthReducer::Web`] never holds the refresh
//! token (browser builds keep it in an http-only cookie instead). The variant
//! is picked once when the root reducer is built.

use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::reducer::Reducer;
use crate::app::state::SliceKey;
use crate::config::Platform;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthStatus {
    #[default]
    Idle,
    Authenticating,
    Authenticated,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthState {
    pub user_id: Option<String>,
    pub display_name: Option<String>,
    pub company_id: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub status: AuthStatus,
    pub error: Option<String>,
    pub logged_in_at: Option<DateTime<Utc>>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated && self.user_id.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthAction {
    LoginStarted,
    #[serde(rename_all = "camelCase")]
    Login {
        user_id: String,
        display_name: Option<String>,
        company_id: Option<String>,
        access_token: Option<String>,
        refresh_token: Option<String>,
        at: DateTime<Utc>,
    },
    LoginFailed {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    TokenRefreshed {
        access_token: String,
        refresh_token: Option<String>,
    },
    Logout,
}

impl AuthAction {
    /// Login with only a user id, stamped with the current time.
    pub fn login(user_id: impl Into<String>) -> Self {
        AuthAction::Login {
            user_id: user_id.into(),
            display_name: None,
            company_id: None,
            access_token: None,
            refresh_token: None,
            at: Utc::now(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AuthAction::LoginStarted => "auth/loginStarted",
            AuthAction::Login { .. } => "auth/login",
            AuthAction::LoginFailed { .. } => "auth/loginFailed",
            AuthAction::TokenRefreshed { .. } => "auth/tokenRefreshed",
            AuthAction::Logout => "auth/logout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthReducer {
    Native,
    Web,
}

impl AuthReducer {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Web => AuthReducer::Web,
            Platform::Ios | Platform::Android => AuthReducer::Native,
        }
    }

    fn keep_refresh_token(self, token: Option<String>) -> Option<String> {
        match self {
            AuthReducer::Native => token,
            AuthReducer::Web => None,
        }
    }
}

impl Reducer for AuthReducer {
    type State = AuthState;

    fn reduce(&self, state: AuthState, action: &Action) -> Result<AuthState, ReducerError> {
        let Action::Auth(auth) = action else {
            return Ok(state);
        };

        match auth {
            AuthAction::LoginStarted => Ok(AuthState {
                status: AuthStatus::Authenticating,
                error: None,
                ..state
            }),
            AuthAction::Login {
                user_id,
                display_name,
                company_id,
                access_token,
                refresh_token,
                at,
            } => {
                if user_id.trim().is_empty() {
                    return Err(ReducerError::new(
                        SliceKey::Auth,
                        auth.kind(),
                        "user id must not be empty",
                    ));
                }
                Ok(AuthState {
                    user_id: Some(user_id.clone()),
                    display_name: display_name.clone(),
                    company_id: company_id.clone(),
                    access_token: access_token.clone(),
                    refresh_token: self.keep_refresh_token(refresh_token.clone()),
                    status: AuthStatus::Authenticated,
                    error: None,
                    logged_in_at: Some(*at),
                })
            }
            AuthAction::LoginFailed { message } => Ok(AuthState {
                status: AuthStatus::Failed,
                error: Some(message.clone()),
                ..AuthState::default()
            }),
            AuthAction::TokenRefreshed {
                access_token,
                refresh_token,
            } => {
                // A refresh that lands after logout must not resurrect the session.
                if !state.is_authenticated() {
                    return Ok(state);
                }
                Ok(AuthState {
                    access_token: Some(access_token.clone()),
                    refresh_token: self.keep_refresh_token(refresh_token.clone()),
                    ..state
                })
            }
            AuthAction::Logout => Ok(AuthState::default()),
        }
    }
}
