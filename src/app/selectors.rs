//! Read-only views over [`RootState`], for use with [`Store::select`].
//!
//! [`Store::select`]: crate::app::store::Store::select

use crate::app::state::RootState;
use crate::slices::campaigns::Campaign;

pub fn select_user_id(state: &RootState) -> Option<&str> {
    state.auth.user_id.as_deref()
}

pub fn select_is_authenticated(state: &RootState) -> bool {
    state.auth.is_authenticated()
}

pub fn select_visible_campaigns(state: &RootState) -> Vec<&Campaign> {
    state.campaigns.visible().collect()
}

pub fn select_unread_total(state: &RootState) -> u32 {
    state.collaboration.unread_total()
}

pub fn select_company_id(state: &RootState) -> Option<&str> {
    state
        .company_dashboard
        .company_id
        .as_deref()
        .or(state.auth.company_id.as_deref())
}
