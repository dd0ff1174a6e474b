pub mod auth;
pub mod companies;
pub mod criteria;
pub mod health;
pub mod pipeline;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
///
/// /users                                           register (public; admin for ADMIN role)
/// /users/me                                        caller's profile (auth)
///
/// /criteria                                        list (public), create (auth)
///
/// /companies                                       list (auth), create + fan-out (admin)
/// /companies/{id}                                  get (auth), delete (admin)
///
/// /pipeline                                        list entries (investor)
/// /pipeline/criteria                               select a criterion (investor)
/// /pipeline/{company_id}/phase                     move entry to a phase (PUT)
/// /pipeline/{company_id}/answers                   answers by type (GET)
/// /pipeline/{company_id}/answers/{key}             record one answer (PUT)
/// /pipeline/{company_id}/stats                     answer stats by type (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/criteria", criteria::router())
        .nest("/companies", companies::router())
        .nest("/pipeline", pipeline::router())
}
