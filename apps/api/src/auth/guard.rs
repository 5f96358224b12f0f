use super::claims::SubjectContext;
use super::AuthFailure;
use crate::domain::Role;
use crate::logging::security;

/// Roles a route admits. Empty means any authenticated subject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredRoles(Vec<Role>);

impl RequiredRoles {
    pub fn authenticated() -> Self {
        Self(Vec::new())
    }

    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut admitted = Vec::new();
        for role in roles {
            if !admitted.contains(&role) {
                admitted.push(role);
            }
        }
        Self(admitted)
    }

    pub fn admits(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }

    pub fn roles(&self) -> &[Role] {
        &self.0
    }
}

/// Decide whether `subject` may proceed on a route requiring `required`.
///
/// `subject` must come from the access verifier for the same request.
pub fn authorize(
    subject: Option<&SubjectContext>,
    required: &RequiredRoles,
) -> Result<(), AuthFailure> {
    let subject = subject.ok_or(AuthFailure::NoCredential)?;

    if subject.status.is_suspended() {
        return Err(AuthFailure::Suspended);
    }

    if !required.admits(subject.role) {
        security::insufficient_role(subject.id, subject.role.as_str());
        return Err(AuthFailure::InsufficientRole);
    }

    Ok(())
}
