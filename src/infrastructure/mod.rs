//! Infrastructure layer - concrete transports

pub mod transport;
