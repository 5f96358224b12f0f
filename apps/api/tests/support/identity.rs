use api::auth::google::{ExternalIdentity, IdentityProvider};
use api::errors::domain::{DomainError, InfraErrorKind};
use async_trait::async_trait;

/// Provider double: one accepted code, one asserted identity.
pub struct StaticIdentityProvider {
    code: String,
    identity: ExternalIdentity,
}

impl StaticIdentityProvider {
    pub fn new(code: &str, identity: ExternalIdentity) -> Self {
        Self {
            code: code.to_string(),
            identity,
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://idp.example.test/authorize?state={state}")
    }

    async fn exchange(&self, code: &str) -> Result<ExternalIdentity, DomainError> {
        if code == self.code {
            Ok(self.identity.clone())
        } else {
            Err(DomainError::infra(
                InfraErrorKind::Upstream,
                "authorization code rejected",
            ))
        }
    }
}

pub fn google_identity(provider_id: &str, email: &str) -> ExternalIdentity {
    ExternalIdentity {
        provider: "google".to_string(),
        provider_id: provider_id.to_string(),
        email: email.to_string(),
        name: "Test User".to_string(),
        picture: None,
    }
}
