//! Shared test utilities for the API and its client.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
