//! Unique test data so parallel tests never collide on identity keys.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

/// External provider subject id in the shape Google uses (digits only).
pub fn unique_provider_id() -> String {
    Ulid::new().0.to_string()
}
