use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::ClientError;
use crate::navigation::LoginRedirect;
use crate::single_flight::SingleFlight;
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub const REFRESH_PATH: &str = "/auth/refresh";

/// Whether a 401 may trigger a refresh-and-retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retry {
    Allowed,
    Disabled,
}

/// Wraps every outbound call with the refresh protocol.
///
/// Only 401 triggers a refresh. Concurrent 401s share one refresh request;
/// each original call is then retried at most once, and the retry itself
/// never refreshes. When the session cannot be recovered the user is sent
/// to the login page and the caller gets the original response back.
#[derive(Clone)]
pub struct RefreshCoordinator {
    transport: Arc<dyn Transport>,
    navigator: Arc<dyn LoginRedirect>,
    refresh: SingleFlight<bool>,
}

impl RefreshCoordinator {
    pub fn new(transport: Arc<dyn Transport>, navigator: Arc<dyn LoginRedirect>) -> Self {
        Self {
            transport,
            navigator,
            refresh: SingleFlight::new(),
        }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.send_with(request, Retry::Allowed).await
    }

    pub async fn send_with(
        &self,
        request: ApiRequest,
        retry: Retry,
    ) -> Result<ApiResponse, ClientError> {
        let res = self.transport.send(&request).await?;
        if !res.is_unauthorized() {
            return Ok(res);
        }

        if retry == Retry::Disabled {
            self.navigator.to_login();
            return Ok(res);
        }

        if !self.refresh_session().await {
            self.navigator.to_login();
            return Ok(res);
        }

        debug!(path = %request.path, "retrying after refresh");
        let retried = self.transport.send(&request).await?;
        if retried.is_unauthorized() {
            self.navigator.to_login();
        }
        Ok(retried)
    }

    /// Join the in-flight refresh or start one. True when the API rotated
    /// the session cookies.
    pub async fn refresh_session(&self) -> bool {
        let transport = Arc::clone(&self.transport);
        let outcome = self
            .refresh
            .run(move || async move {
                match transport.send(&ApiRequest::get(REFRESH_PATH)).await {
                    Ok(res) if res.is_success() => true,
                    Ok(res) => {
                        debug!(status = res.status, "refresh refused");
                        false
                    }
                    Err(e) => {
                        warn!(error = %e, "refresh request failed");
                        false
                    }
                }
            })
            .await;

        outcome.unwrap_or(false)
    }
}
