pub mod auth;
pub mod env;
