//! Route-level authorization.
//!
//! `RequireRoles` is attached to a resource or scope at registration time
//! with the roles it admits. It runs the access verifier, applies the
//! guard, and hands the resolved [`SubjectContext`] to handlers through
//! request extensions (read back by the `CurrentUser` extractor).
//!
//! Denials are rendered here rather than returned as `Err`, so the problem
//! body is built while the request's trace id is still in scope.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{authorize, RequiredRoles, SessionVerifier, SubjectContext};
use crate::domain::Role;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Clone)]
pub struct RequireRoles {
    required: Rc<RequiredRoles>,
}

impl RequireRoles {
    /// Any authenticated, non-suspended subject.
    pub fn authenticated() -> Self {
        Self {
            required: Rc::new(RequiredRoles::authenticated()),
        }
    }

    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            required: Rc::new(RequiredRoles::any_of(roles)),
        }
    }

    pub fn admin() -> Self {
        Self::any_of([Role::Admin])
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRoles
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRolesMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRolesMiddleware {
            service: Rc::new(service),
            required: Rc::clone(&self.required),
        }))
    }
}

pub struct RequireRolesMiddleware<S> {
    service: Rc<S>,
    required: Rc<RequiredRoles>,
}

async fn admit(req: &ServiceRequest, required: &RequiredRoles) -> Result<SubjectContext, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not available"))?;

    let subject = SessionVerifier::access(&state.security, state.directory.as_ref())
        .verify(req.headers())
        .await?;

    authorize(Some(&subject), required)?;
    Ok(subject)
}

impl<S, B> Service<ServiceRequest> for RequireRolesMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = Rc::clone(&self.required);

        Box::pin(async move {
            match admit(&req, &required).await {
                Ok(subject) => {
                    req.extensions_mut().insert(subject);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
