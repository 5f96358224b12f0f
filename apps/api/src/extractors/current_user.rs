use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::auth::{SessionVerifier, SubjectContext};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// The authenticated caller, resolved from the live directory record.
///
/// Behind `RequireRoles` this reuses the subject the middleware already
/// verified. On unguarded routes it runs the access verifier itself.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SubjectContext);

impl CurrentUser {
    pub fn into_inner(self) -> SubjectContext {
        self.0
    }
}

impl Deref for CurrentUser {
    type Target = SubjectContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let resolved = req.extensions().get::<SubjectContext>().cloned();
            if let Some(subject) = resolved {
                return Ok(CurrentUser(subject));
            }

            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let subject = SessionVerifier::access(&state.security, state.directory.as_ref())
                .verify(req.headers())
                .await?;

            Ok(CurrentUser(subject))
        })
    }
}
