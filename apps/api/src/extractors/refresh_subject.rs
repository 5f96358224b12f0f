use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::auth::SessionVerifier;
use crate::domain::User;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// The live user behind the request's refresh cookie.
#[derive(Debug, Clone)]
pub struct RefreshSubject(pub User);

impl RefreshSubject {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl Deref for RefreshSubject {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for RefreshSubject {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let user = SessionVerifier::refresh(&state.security, state.directory.as_ref())
                .resolve(req.headers())
                .await?;

            Ok(RefreshSubject(user))
        })
    }
}
