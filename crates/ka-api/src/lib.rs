//! kubeask API: library crate for the cluster question server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `ka-e2e-tests`) can build the router and state directly.

pub mod config;
pub mod error;
pub mod inference;
pub mod routes;
pub mod state;
