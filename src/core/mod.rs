//! Domain core: access gate, balance aggregation, workspace summaries and the
//! service that wires them to storage.

pub mod access;
pub mod balance;
pub mod errors;
pub mod models;
pub mod services;
pub mod summary;
