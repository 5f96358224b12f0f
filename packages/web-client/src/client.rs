use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::coordinator::{RefreshCoordinator, Retry};
use crate::error::ClientError;
use crate::navigation::LoginRedirect;
use crate::transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    /// Reads `API_URL`; a client without it cannot make any call.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_url = std::env::var("API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ClientError::Config("API_URL is not set".to_string()))?;
        Ok(Self { api_url })
    }
}

/// Subject context returned by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSubject {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub status: String,
    pub last_logout: Option<String>,
}

/// Typed calls over the refresh coordinator.
#[derive(Clone)]
pub struct ApiClient {
    coordinator: RefreshCoordinator,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, navigator: Arc<dyn LoginRedirect>) -> Self {
        Self {
            coordinator: RefreshCoordinator::new(transport, navigator),
        }
    }

    pub fn from_config(
        config: &ClientConfig,
        navigator: Arc<dyn LoginRedirect>,
    ) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config.api_url.clone())?;
        Ok(Self::new(Arc::new(transport), navigator))
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    pub async fn fetch(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.coordinator.send(request).await
    }

    /// Send and decode; non-2xx becomes `ClientError::Status`.
    pub async fn json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        self.fetch(request).await?.json()
    }

    pub async fn me(&self) -> Result<CurrentSubject, ClientError> {
        self.json(ApiRequest::get("/auth/me")).await
    }

    /// Logging out with a dead session must not start a refresh.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let res = self
            .coordinator
            .send_with(ApiRequest::post("/auth/logout"), Retry::Disabled)
            .await?;
        res.json::<Value>().map(|_| ())
    }
}
