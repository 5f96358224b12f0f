#![allow(dead_code)]

pub mod auth;
pub mod factory;
pub mod identity;
pub mod test_state;
