//! Terminal front-end for the client

pub mod play;
