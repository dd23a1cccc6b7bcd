//! Domain layer - snapshot state, phase mapping and the transport port

pub mod phase;
pub mod snapshot;
pub mod transport;
pub mod value_objects;
