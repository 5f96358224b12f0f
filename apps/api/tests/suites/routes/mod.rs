mod error_shape;
mod health;
mod users_admin;
