//! Application layer - the session dispatchers and their public surface

pub mod api;
pub mod session;
pub mod signals;
