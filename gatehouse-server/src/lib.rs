//! Library surface of the Gatehouse server.
//!
//! The binary in `main.rs` wires these modules together; exposing them as a
//! library keeps the handler stack reachable from the in-crate test tree.

pub mod db;
pub mod infra;
pub mod routes;
pub mod users;

pub use infra::app_state::AppState;

#[cfg(test)]
mod tests;
