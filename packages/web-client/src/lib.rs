//! Browser-side session plumbing for the stock-alert API.
//!
//! Credentials live in httpOnly cookies, so the client never reads a token.
//! It only reacts to status codes: a 401 triggers one shared refresh and a
//! single retry, anything else is handed back untouched.

pub mod client;
pub mod coordinator;
pub mod error;
pub mod navigation;
pub mod single_flight;
pub mod transport;

pub use client::{ApiClient, ClientConfig, CurrentSubject};
pub use coordinator::{RefreshCoordinator, Retry, REFRESH_PATH};
pub use error::ClientError;
pub use navigation::{guard, HeadlessNavigator, LoginRedirect, Navigation};
pub use single_flight::SingleFlight;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
