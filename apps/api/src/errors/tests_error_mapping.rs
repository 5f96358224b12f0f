// Domain to HTTP error mapping, no server or database involved
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let app: AppError = DomainError::validation("bad field").into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_conflicts() {
    let taken: AppError = DomainError::conflict(ConflictKind::IdentityTaken, "taken").into();
    assert_eq!(taken.code().as_str(), "IDENTITY_TAKEN");
    assert_eq!(taken.status().as_u16(), 409);

    let other: AppError = DomainError::conflict(ConflictKind::Other("x".into()), "x").into();
    assert_eq!(other.code(), ErrorCode::Conflict);
    assert_eq!(other.status().as_u16(), 409);
}

#[test]
fn admin_bootstrap_conflict_is_forbidden() {
    let app: AppError = DomainError::conflict(ConflictKind::AdminExists, "exists").into();
    assert_eq!(app.code(), ErrorCode::AdminAlreadyExists);
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_not_found() {
    let user: AppError = DomainError::user_not_found().into();
    assert_eq!(user.code(), ErrorCode::UserNotFound);
    assert_eq!(user.status().as_u16(), 404);

    let other: AppError = DomainError::not_found(NotFoundKind::Other("Thing".into()), "nope").into();
    assert_eq!(other.code(), ErrorCode::NotFound);
}

#[test]
fn maps_infra() {
    let timeout: AppError = DomainError::infra(InfraErrorKind::Timeout, "slow").into();
    assert_eq!(timeout.code(), ErrorCode::DbUnavailable);
    assert_eq!(timeout.status().as_u16(), 503);

    let upstream: AppError = DomainError::infra(InfraErrorKind::Upstream, "idp down").into();
    assert_eq!(upstream.code(), ErrorCode::IdentityProviderError);
    assert_eq!(upstream.status().as_u16(), 502);

    let other: AppError = DomainError::infra(InfraErrorKind::Other("x".into()), "x").into();
    assert_eq!(other.code(), ErrorCode::DbError);
    assert_eq!(other.status().as_u16(), 500);
}
