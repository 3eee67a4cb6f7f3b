//! Infrastructure layer: adapters that implement the application ports.

pub mod cache;
pub mod eventing;
pub mod http;
pub mod persistence;
