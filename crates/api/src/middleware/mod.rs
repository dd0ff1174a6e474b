//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Same, but a missing header is not an error.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` role.
//! - [`rbac::RequireInvestor`] -- Requires the `INVESTOR` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.

pub mod auth;
pub mod rbac;
