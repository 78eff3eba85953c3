//! Client state store with selective durable persistence.
//!
//! Six independently owned slices are composed into one [`RootState`],
//! wrapped by a persistence decorator that rehydrates the whitelisted slices
//! from device storage at startup and writes them back as they change.
//!
//! [`RootState`]: app::state::RootState

pub mod app;
pub mod assets;
pub mod config;
pub mod logging;
pub mod persist;
pub mod slices;
pub mod theme;
