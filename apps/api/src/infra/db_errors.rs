//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert `sea_orm::DbErr` into `DomainError` here, and higher
//! layers map `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Identity uniqueness is enforced by `users_provider_provider_id_key` in
/// postgres and reported as `users.provider, users.provider_id` by sqlite.
fn is_identity_violation(msg: &str) -> bool {
    msg.contains("users_provider_provider_id_key")
        || msg.contains("UNIQUE constraint failed: users.provider, users.provider_id")
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    if let sea_orm::DbErr::RecordNotFound(_) = &e {
        return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
    }

    if is_identity_violation(&error_msg) {
        warn!(%trace_id, "identity unique violation");
        return DomainError::conflict(
            ConflictKind::IdentityTaken,
            "Identity already linked to a user",
        );
    }

    if mentions_sqlstate(&error_msg, "23505") || error_msg.contains("UNIQUE constraint failed") {
        warn!(%trace_id, error = %Redacted(&error_msg), "unique violation");
        return DomainError::conflict(
            ConflictKind::Other("UniqueViolation".into()),
            "Unique constraint violation",
        );
    }

    match &e {
        sea_orm::DbErr::Conn(_) | sea_orm::DbErr::ConnectionAcquire(_) => {
            error!(%trace_id, error = %Redacted(&error_msg), "database unavailable");
            DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable")
        }
        _ if error_msg.contains("timeout") || mentions_sqlstate(&error_msg, "57014") => {
            warn!(%trace_id, error = %Redacted(&error_msg), "database timeout");
            DomainError::infra(InfraErrorKind::Timeout, "Database operation timed out")
        }
        _ => {
            error!(%trace_id, error = %Redacted(&error_msg), "unhandled database error");
            DomainError::infra(
                InfraErrorKind::Other("DbErr".into()),
                "Database operation failed",
            )
        }
    }
}
