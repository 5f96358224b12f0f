//! Structured security events. Each carries an `event` field so log
//! pipelines can alert on them without parsing messages.

use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthFailure;
use crate::auth::CredentialClass;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub fn login_succeeded(user_id: Uuid, provider: &str) {
    let trace_id = trace_ctx::trace_id();

    info!(
        event = "SECURITY_LOGIN_SUCCEEDED",
        %trace_id,
        %user_id,
        provider,
        "Login succeeded"
    );
}

pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %email.map(Redacted).unwrap_or(Redacted("")),
        reason,
        "Authentication failure"
    );
}

/// A credential failed verification. Absent credentials are not logged.
pub fn credential_rejected(class: CredentialClass, failure: AuthFailure) {
    if matches!(failure, AuthFailure::NoCredential) {
        return;
    }
    let trace_id = trace_ctx::trace_id();

    let event = match class {
        CredentialClass::Access => "SECURITY_ACCESS_REJECTED",
        CredentialClass::Refresh => "SECURITY_REFRESH_REJECTED",
    };
    warn!(
        event,
        %trace_id,
        credential = class.as_str(),
        reason = failure.as_str(),
        "Credential rejected"
    );
}

pub fn suspended_access(user_id: Uuid, class: CredentialClass) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_SUSPENDED_ACCESS",
        %trace_id,
        %user_id,
        credential = class.as_str(),
        "Suspended account presented a valid credential"
    );
}

pub fn insufficient_role(user_id: Uuid, role: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_INSUFFICIENT_ROLE",
        %trace_id,
        %user_id,
        role,
        "Role not permitted for route"
    );
}

pub fn shared_secret_fallback() {
    warn!(
        event = "SECURITY_SHARED_SECRET_FALLBACK",
        "JWT_ACCESS_SECRET/JWT_REFRESH_SECRET not both set; falling back to JWT_SECRET for both credential classes"
    );
}
