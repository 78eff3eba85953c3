use crate::app::action::Action;
use crate::app::error::ReducerError;
use crate::app::reducer::Reducer;
use crate::slices::auth::AuthAction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Archived,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CampaignFilter {
    #[default]
    All,
    Only(CampaignStatus),
}

impl CampaignFilter {
    pub fn matches(self, campaign: &Campaign) -> bool {
        match self {
            CampaignFilter::All => true,
            CampaignFilter::Only(status) => campaign.status == status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: CampaignStatus,
    #[serde(default)]
    pub budget: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignsState {
    pub campaigns: BTreeMap<String, Campaign>,
    pub filter: CampaignFilter,
    pub loading: bool,
}

impl CampaignsState {
    /// Campaigns passing the active filter, ordered by id.
    pub fn visible(&self) -> impl Iterator<Item = &Campaign> {
        let filter = self.filter;
        self.campaigns.values().filter(move |c| filter.matches(c))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CampaignsAction {
    FetchStarted,
    Loaded { campaigns: Vec<Campaign> },
    Upserted { campaign: Campaign },
    Removed { id: String },
    FilterChanged { filter: CampaignFilter },
}

impl CampaignsAction {
    pub fn kind(&self) -> &'static str {
        match self {
            CampaignsAction::FetchStarted => "campaigns/fetchStarted",
            CampaignsAction::Loaded { .. } => "campaigns/loaded",
            CampaignsAction::Upserted { .. } => "campaigns/upserted",
            CampaignsAction::Removed { .. } => "campaigns/removed",
            CampaignsAction::FilterChanged { .. } => "campaigns/filterChanged",
        }
    }
}

pub struct CampaignsReducer;

impl Reducer for CampaignsReducer {
    type State = CampaignsState;

    fn reduce(&self, state: CampaignsState, action: &Action) -> Result<CampaignsState, ReducerError> {
        let action = match action {
            Action::Campaigns(action) => action,
            Action::Auth(AuthAction::Logout) => return Ok(CampaignsState::default()),
            _ => return Ok(state),
        };

        let mut state = state;
        match action {
            CampaignsAction::FetchStarted => state.loading = true,
            CampaignsAction::Loaded { campaigns } => {
                state.campaigns = campaigns
                    .iter()
                    .map(|c| (c.id.clone(), c.clone()))
                    .collect();
                state.loading = false;
            }
            CampaignsAction::Upserted { campaign } => {
                state.campaigns.insert(campaign.id.clone(), campaign.clone());
            }
            CampaignsAction::Removed { id } => {
                state.campaigns.remove(id);
            }
            CampaignsAction::FilterChanged { filter } => state.filter = *filter,
        }
        Ok(state)
    }
}
