use api::domain::{NewUser, Role, User, UserStatus};
use api::state::app_state::AppState;
use api_test_support::unique_helpers::{unique_email, unique_provider_id};

/// Insert a user with unique identity keys.
pub async fn create_test_user(state: &AppState, role: Role, status: UserStatus) -> User {
    state
        .directory
        .create(
            NewUser::new("google", unique_provider_id(), unique_email("user"), "Test User")
                .with_role(role)
                .with_status(status),
        )
        .await
        .expect("user should be created")
}

pub async fn create_active_user(state: &AppState) -> User {
    create_test_user(state, Role::User, UserStatus::Active).await
}

pub async fn create_admin(state: &AppState) -> User {
    create_test_user(state, Role::Admin, UserStatus::Active).await
}
