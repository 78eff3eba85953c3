use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::reducer::Reducer;
use crate::slices::auth::AuthAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollabSession {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub unread: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaborationState {
    pub sessions: Vec<CollabSession>,
}

impl CollaborationState {
    pub fn unread_total(&self) -> u32 {
        self.sessions.iter().map(|s| s.unread).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CollaborationAction {
    SessionOpened {
        session: CollabSession,
    },
    SessionClosed {
        id: String,
    },
    #[serde(rename_all = "camelCase")]
    MessagesReceived {
        session_id: String,
        count: u32,
    },
    #[serde(rename_all = "camelCase")]
    MarkedRead {
        session_id: String,
    },
}

impl CollaborationAction {
    pub fn kind(&self) -> &'static str {
        match self {
            CollaborationAction::SessionOpened { .. } => "collaboration/sessionOpened",
            CollaborationAction::SessionClosed { .. } => "collaboration/sessionClosed",
            CollaborationAction::MessagesReceived { .. } => "collaboration/messagesReceived",
            CollaborationAction::MarkedRead { .. } => "collaboration/markedRead",
        }
    }
}

pub struct CollaborationReducer;

impl Reducer for CollaborationReducer {
    type State = CollaborationState;

    fn reduce(
        &self,
        state: CollaborationState,
        action: &Action,
    ) -> Result<CollaborationState, ReducerError> {
        let action = match action {
            Action::Collaboration(action) => action,
            Action::Auth(AuthAction::Logout) => return Ok(CollaborationState::default()),
            _ => return Ok(state),
        };

        let mut state = state;
        match action {
            CollaborationAction::SessionOpened { session } => {
                match state.sessions.iter_mut().find(|s| s.id == session.id) {
                    Some(existing) => *existing = session.clone(),
                    None => state.sessions.push(session.clone()),
                }
            }
            CollaborationAction::SessionClosed { id } => state.sessions.retain(|s| &s.id != id),
            CollaborationAction::MessagesReceived { session_id, count } => {
                if let Some(session) = state.sessions.iter_mut().find(|s| &s.id == session_id) {
                    session.unread = session.unread.saturating_add(*count);
                }
            }
            CollaborationAction::MarkedRead { session_id } => {
                if let Some(session) = state.sessions.iter_mut().find(|s| &s.id == session_id) {
                    session.unread = 0;
                }
            }
        }
        Ok(state)
    }
}
