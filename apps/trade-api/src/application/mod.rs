//! Application layer: service orchestration and port definitions.

pub mod ports;
pub mod services;
