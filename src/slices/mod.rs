//! The six state slices composed into [`RootState`](crate::app::state::RootState).
//!
//! Each module owns its state shape, its action enum and a reducer. Only
//! `auth` is persisted by default; the others hold session data and reset on
//! logout.

pub mod auth;
pub mod campaigns;
pub mod collaboration;
pub mod company_dashboard;
pub mod dashboard;
pub mod user_management;
