use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::reducer::Reducer;
use crate::slices::auth::AuthAction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyDashboardState {
    pub company_id: Option<String>,
    pub metrics: BTreeMap<String, f64>,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CompanyDashboardAction {
    #[serde(rename_all = "camelCase")]
    CompanySelected { company_id: String },
    #[serde(rename_all = "camelCase")]
    MetricsLoaded {
        company_id: String,
        metrics: BTreeMap<String, f64>,
    },
    Cleared,
}

impl CompanyDashboardAction {
    pub fn kind(&self) -> &'static str {
        match self {
            CompanyDashboardAction::CompanySelected { .. } => "companyDashboard/companySelected",
            CompanyDashboardAction::MetricsLoaded { .. } => "companyDashboard/metricsLoaded",
            CompanyDashboardAction::Cleared => "companyDashboard/cleared",
        }
    }
}

pub struct CompanyDashboardReducer;

impl Reducer for CompanyDashboardReducer {
    type State = CompanyDashboardState;

    fn reduce(
        &self,
        state: CompanyDashboardState,
        action: &Action,
    ) -> Result<CompanyDashboardState, ReducerError> {
        let action = match action {
            Action::CompanyDashboard(action) => action,
            Action::Auth(AuthAction::Logout) => return Ok(CompanyDashboardState::default()),
            _ => return Ok(state),
        };

        Ok(match action {
            CompanyDashboardAction::CompanySelected { company_id } => {
                if state.company_id.as_ref() == Some(company_id) {
                    state
                } else {
                    CompanyDashboardState {
                        company_id: Some(company_id.clone()),
                        metrics: BTreeMap::new(),
                        loading: true,
                    }
                }
            }
            CompanyDashboardAction::MetricsLoaded {
                company_id,
                metrics,
            } => {
                // Responses for a company that is no longer selected are stale.
                if state.company_id.as_ref() != Some(company_id) {
                    return Ok(state);
                }
                CompanyDashboardState {
                    metrics: metrics.clone(),
                    loading: false,
                    ..state
                }
            }
            CompanyDashboardAction::Cleared => CompanyDashboardState::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: CompanyDashboardState, action: CompanyDashboardAction) -> CompanyDashboardState {
        CompanyDashboardReducer
            .reduce(state, &Action::CompanyDashboard(action))
            .unwrap()
    }

    #[test]
    fn test_stale_metrics_are_dropped() {
        let state = reduce(
            CompanyDashboardState::default(),
            CompanyDashboardAction::CompanySelected {
                company_id: "c1".into(),
            },
        );
        let state = reduce(
            state,
            CompanyDashboardAction::CompanySelected {
                company_id: "c2".into(),
            },
        );
        let state = reduce(
            state,
            CompanyDashboardAction::MetricsLoaded {
                company_id: "c1".into(),
                metrics: BTreeMap::from([("reach".to_string(), 10.0)]),
            },
        );
        assert!(state.metrics.is_empty());
        assert!(state.loading);
    }

    #[test]
    fn test_metrics_for_selected_company_land() {
        let state = reduce(
            CompanyDashboardState::default(),
            CompanyDashboardAction::CompanySelected {
                company_id: "c1".into(),
            },
        );
        let state = reduce(
            state,
            CompanyDashboardAction::MetricsLoaded {
                company_id: "c1".into(),
                metrics: BTreeMap::from([("reach".to_string(), 10.0)]),
            },
        );
        assert_eq!(state.metrics.get("reach"), Some(&10.0));
        assert!(!state.loading);
    }
}
