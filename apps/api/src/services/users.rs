use tracing::{debug, info};
use uuid::Uuid;

use crate::auth::google::ExternalIdentity;
use crate::directory::UserDirectory;
use crate::domain::{NewUser, Role, User, UserStatus};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;

/// Shows only the first 4 characters of an external subject id.
fn redact_provider_id(provider_id: &str) -> String {
    let count = provider_id.chars().count();
    if count <= 4 {
        "*".repeat(count)
    } else {
        format!("{}***", provider_id.chars().take(4).collect::<String>())
    }
}

/// Find the subject bound to `identity`, creating it on first sight.
///
/// Idempotent: concurrent first logins for the same identity both resolve
/// to the one record that won the insert.
pub async fn ensure_user(
    directory: &dyn UserDirectory,
    identity: ExternalIdentity,
) -> Result<User, AppError> {
    if let Some(user) = directory
        .find_by_provider_id(&identity.provider, &identity.provider_id)
        .await?
    {
        debug!(user_id = %user.id, "existing subject for identity");
        return Ok(user);
    }

    let provider = identity.provider.clone();
    let provider_id = identity.provider_id.clone();
    let new_user = NewUser::new(
        identity.provider,
        identity.provider_id,
        identity.email,
        identity.name,
    )
    .with_picture(identity.picture);

    match directory.create(new_user).await {
        Ok(user) => {
            info!(
                user_id = %user.id,
                email = %Redacted(&user.email),
                provider_id = %redact_provider_id(&provider_id),
                "First user creation"
            );
            Ok(user)
        }
        Err(DomainError::Conflict(ConflictKind::IdentityTaken, _)) => directory
            .find_by_provider_id(&provider, &provider_id)
            .await?
            .ok_or_else(|| AppError::from(DomainError::user_not_found())),
        Err(e) => Err(e.into()),
    }
}

pub async fn admin_exists(directory: &dyn UserDirectory) -> Result<bool, AppError> {
    Ok(directory.count_by_role(Role::Admin).await? > 0)
}

/// Promote `user_id` to admin, allowed only while no admin exists.
pub async fn bootstrap_admin(
    directory: &dyn UserDirectory,
    user_id: Uuid,
) -> Result<User, AppError> {
    if admin_exists(directory).await? {
        return Err(DomainError::conflict(
            ConflictKind::AdminExists,
            "An administrator already exists",
        )
        .into());
    }

    let user = directory.update_role(user_id, Role::Admin).await?;
    info!(user_id = %user.id, "bootstrap admin promoted");
    Ok(user)
}

pub async fn get_user(directory: &dyn UserDirectory, user_id: Uuid) -> Result<User, AppError> {
    directory
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::user_not_found().into())
}

/// All users, oldest first, optionally filtered by a case-insensitive
/// substring of email or name.
pub async fn list_users(
    directory: &dyn UserDirectory,
    query: Option<&str>,
) -> Result<Vec<User>, AppError> {
    let users = directory.list().await?;
    let keyword = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => q.to_lowercase(),
        None => return Ok(users),
    };

    Ok(users
        .into_iter()
        .filter(|u| {
            u.email.to_lowercase().contains(&keyword) || u.name.to_lowercase().contains(&keyword)
        })
        .collect())
}

pub async fn create_user(
    directory: &dyn UserDirectory,
    new_user: NewUser,
) -> Result<User, AppError> {
    if new_user.email.trim().is_empty() || !new_user.email.contains('@') {
        return Err(AppError::invalid(
            crate::errors::ErrorCode::InvalidEmail,
            "A valid email is required",
        ));
    }
    let user = directory.create(new_user).await?;
    info!(user_id = %user.id, role = %user.role, "user created by admin");
    Ok(user)
}

pub async fn remove_user(directory: &dyn UserDirectory, user_id: Uuid) -> Result<(), AppError> {
    if !directory.remove(user_id).await? {
        return Err(DomainError::user_not_found().into());
    }
    info!(%user_id, "user removed by admin");
    Ok(())
}

/// Change account status. Takes effect on the subject's next verification.
pub async fn set_status(
    directory: &dyn UserDirectory,
    user_id: Uuid,
    status: UserStatus,
) -> Result<User, AppError> {
    let user = directory.update_status(user_id, status).await?;
    info!(user_id = %user.id, %status, "user status changed");
    Ok(user)
}
