//! Core application logic: state, actions, reducers and the store.

pub mod action;
pub mod context;
pub mod error;
pub mod middleware;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod store;
