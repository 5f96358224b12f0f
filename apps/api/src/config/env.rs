use std::env;

/// Deployment environment; governs cookie `Secure`/`SameSite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Production,
    Development,
    Test,
}

impl RuntimeEnv {
    /// Parse an `APP_ENV` value. Unknown or missing values are development.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("production") | Some("prod") => RuntimeEnv::Production,
            Some("test") => RuntimeEnv::Test,
            _ => RuntimeEnv::Development,
        }
    }

    pub fn from_env() -> Self {
        Self::parse(env::var("APP_ENV").ok().as_deref())
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeEnv::Production)
    }
}

/// Optional variable; empty strings count as unset.
pub fn opt_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
