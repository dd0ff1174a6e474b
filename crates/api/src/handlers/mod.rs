pub mod auth;
pub mod companies;
pub mod criteria;
pub mod pipeline;
pub mod users;
