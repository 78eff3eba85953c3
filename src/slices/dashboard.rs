use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::reducer::Reducer;
use crate::slices::auth::AuthAction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardState {
    pub widgets: Vec<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DashboardAction {
    RefreshStarted,
    Refreshed {
        widgets: Vec<String>,
        at: DateTime<Utc>,
    },
    WidgetRemoved {
        id: String,
    },
}

impl DashboardAction {
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardAction::RefreshStarted => "dashboard/refreshStarted",
            DashboardAction::Refreshed { .. } => "dashboard/refreshed",
            DashboardAction::WidgetRemoved { .. } => "dashboard/widgetRemoved",
        }
    }
}

pub struct DashboardReducer;

impl Reducer for DashboardReducer {
    type State = DashboardState;

    fn reduce(&self, state: DashboardState, action: &Action) -> Result<DashboardState, ReducerError> {
        let action = match action {
            Action::Dashboard(action) => action,
            Action::Auth(AuthAction::Logout) => return Ok(DashboardState::default()),
            _ => return Ok(state),
        };

        Ok(match action {
            DashboardAction::RefreshStarted => DashboardState {
                loading: true,
                ..state
            },
            DashboardAction::Refreshed { widgets, at } => DashboardState {
                widgets: widgets.clone(),
                refreshed_at: Some(*at),
                loading: false,
            },
            DashboardAction::WidgetRemoved { id } => {
                let mut state = state;
                state.widgets.retain(|w| w != id);
                state
            }
        })
    }
}
