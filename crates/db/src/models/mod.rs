//! Domain model structs and DTOs.
//!
//! Catalog entities (`criterion`, `company`) and users are plain rows. The
//! investor's selected criteria and pipeline are embedded documents, see
//! [`pipeline`].

pub mod company;
pub mod criterion;
pub mod pipeline;
pub mod user;
