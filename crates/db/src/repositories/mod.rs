//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod company_repo;
pub mod criterion_repo;
pub mod investor_repo;
pub mod user_repo;

pub use company_repo::CompanyRepo;
pub use criterion_repo::CriterionRepo;
pub use investor_repo::InvestorRepo;
pub use user_repo::UserRepo;
