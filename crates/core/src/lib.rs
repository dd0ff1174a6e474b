//! Domain vocabulary shared by every FounderNest crate.
//!
//! Nothing in here performs I/O: these are ids, role names, screening
//! phases, answer values, and the small pure helpers (stats tally,
//! pagination) that the pipeline services and the HTTP layer agree on.

pub mod answer;
pub mod error;
pub mod pagination;
pub mod phase;
pub mod roles;
pub mod types;
