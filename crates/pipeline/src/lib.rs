//! The per-investor screening pipeline.
//!
//! Every operation here is written against a `&dyn Store` and is
//! request-scoped. Modules, leaf to root:
//!
//! - [`catalog`] -- global criteria catalog.
//! - [`registry`] -- company registry and the fan-out of new companies into
//!   every investor pipeline.
//! - [`onboarding`] -- seeds a new investor's pipeline from the registry.
//! - [`selection`] -- investors adopting criteria, with answer back-fill.
//! - [`phase`] -- moving one pipeline entry between screening phases.
//! - [`answers`] -- recording one answer for one (company, criterion).
//! - [`query`] -- filtered pipeline pages and answer statistics.
//!
//! All investor-document writes go through [`document::modify_investor`].

pub mod answers;
pub mod catalog;
pub mod document;
pub mod error;
pub mod onboarding;
pub mod phase;
pub mod query;
pub mod registry;
pub mod selection;

pub use error::{PipelineError, PipelineResult};
pub use registry::{CompanyCreated, FanOutReport};
