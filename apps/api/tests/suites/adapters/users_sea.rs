use api::directory::{SeaUserDirectory, UserDirectory};
use api::domain::{NewUser, Role, UserStatus};
use api::entities::Users;
use api::errors::domain::{ConflictKind, DomainError};
use api_test_support::unique_helpers::{unique_email, unique_provider_id};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use time::OffsetDateTime;
use uuid::Uuid;

/// Single-connection in-memory sqlite with the users table created.
async fn sqlite_directory() -> Result<SeaUserDirectory, Box<dyn std::error::Error>> {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let conn: DatabaseConnection = Database::connect(opts).await?;

    let backend = conn.get_database_backend();
    let schema = Schema::new(backend);
    conn.execute(backend.build(&schema.create_table_from_entity(Users)))
        .await?;

    Ok(SeaUserDirectory::new(conn))
}

fn new_user() -> NewUser {
    NewUser::new("google", unique_provider_id(), unique_email("sea"), "Sea User")
}

#[tokio::test]
async fn create_and_find_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = sqlite_directory().await?;
    let created = dir.create(new_user().with_picture(Some("p.png".into()))).await?;

    assert_eq!(created.role, Role::User);
    assert_eq!(created.status, UserStatus::Active);

    let by_id = dir.find_by_id(created.id).await?.expect("found by id");
    assert_eq!(by_id.email, created.email);
    assert_eq!(by_id.picture.as_deref(), Some("p.png"));

    let by_identity = dir
        .find_by_provider_id("google", &created.provider_id)
        .await?
        .expect("found by identity");
    assert_eq!(by_identity.id, created.id);

    assert!(dir.find_by_id(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn duplicate_identity_is_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let dir = sqlite_directory().await?;
    let first = new_user();
    let dup = NewUser::new("google", first.provider_id.clone(), unique_email("dup"), "Dup");
    dir.create(first).await?;

    let err = dir.create(dup).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::IdentityTaken, _)
    ));
    Ok(())
}

#[tokio::test]
async fn updates_persist() -> Result<(), Box<dyn std::error::Error>> {
    let dir = sqlite_directory().await?;
    let user = dir.create(new_user()).await?;

    let promoted = dir.update_role(user.id, Role::Admin).await?;
    assert_eq!(promoted.role, Role::Admin);
    assert_eq!(dir.count_by_role(Role::Admin).await?, 1);

    let suspended = dir.update_status(user.id, UserStatus::Suspended).await?;
    assert!(suspended.status.is_suspended());

    let at = OffsetDateTime::now_utc().replace_nanosecond(0)?;
    dir.update_last_login(user.id, at).await?;
    dir.update_last_logout(user.id, at).await?;
    let stored = dir.find_by_id(user.id).await?.expect("still there");
    assert_eq!(stored.last_login, Some(at));
    assert_eq!(stored.last_logout, Some(at));
    Ok(())
}

#[tokio::test]
async fn update_of_missing_user_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let dir = sqlite_directory().await?;
    let err = dir
        .update_status(Uuid::new_v4(), UserStatus::Suspended)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(..)));
    Ok(())
}

#[tokio::test]
async fn list_and_remove() -> Result<(), Box<dyn std::error::Error>> {
    let dir = sqlite_directory().await?;
    let a = dir.create(new_user()).await?;
    let b = dir.create(new_user()).await?;

    let all = dir.list().await?;
    assert_eq!(all.len(), 2);
    assert!(all.iter().any(|u| u.id == a.id));

    assert!(dir.remove(b.id).await?);
    assert!(!dir.remove(b.id).await?);
    assert_eq!(dir.list().await?.len(), 1);
    Ok(())
}
