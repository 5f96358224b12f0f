use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns used for log redaction.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email addresses
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Compact JWS: three base64url segments joined by dots
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
        });
        &JWT_REGEX
    }

    /// Session cookie assignments (`access_token=...`, `refresh_token=...`)
    pub fn session_cookie() -> &'static Regex {
        static COOKIE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b(access_token|refresh_token|oauth_state)=[^;\s]+").unwrap()
        });
        &COOKIE_REGEX
    }

    /// Base64-like runs of 16+ chars
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }
}

/// Redacts sensitive information from a string.
///
/// - Emails keep the first character of the local part and the full domain.
/// - Session cookie values, JWTs, and long base64-like runs become `[REDACTED_TOKEN]`.
///
/// Cookies and JWTs are handled before emails so a token payload is never
/// partially rewritten.
pub fn redact(input: &str) -> String {
    let cookies = PiiRegexRegistry::session_cookie()
        .replace_all(input, |caps: &regex::Captures| format!("{}=[REDACTED_TOKEN]", &caps[1]));

    let jwts = PiiRegexRegistry::jwt().replace_all(&cookies, "[REDACTED_TOKEN]");

    let emails = PiiRegexRegistry::email().replace_all(&jwts, |caps: &regex::Captures| {
        let full_match = &caps[0];
        match full_match.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            Some((_, domain)) => format!("@{domain}"),
            None => full_match.to_string(),
        }
    });

    PiiRegexRegistry::base64_token()
        .replace_all(&emails, "[REDACTED_TOKEN]")
        .to_string()
}

/// Display wrapper that applies [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
