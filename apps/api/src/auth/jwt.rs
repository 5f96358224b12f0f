use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::claims::{Claims, CredentialClass, SubjectClaims};
use super::AuthFailure;
use crate::domain::User;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly signed credential and the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub claims: Claims,
}

fn unix_seconds(now: SystemTime) -> Result<i64, AppError> {
    Ok(now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("System clock is before the unix epoch"))?
        .as_secs() as i64)
}

/// Sign `subject` as a `class` credential valid for `ttl` from `now`.
pub fn issue(
    subject: &SubjectClaims,
    class: CredentialClass,
    secret: &[u8],
    ttl: Duration,
    now: SystemTime,
) -> Result<IssuedCredential, AppError> {
    let iat = unix_seconds(now)?;
    let exp = i64::try_from(ttl.as_secs())
        .ok()
        .and_then(|ttl| iat.checked_add(ttl))
        .ok_or_else(|| AppError::internal("Credential lifetime overflows the expiry claim"))?;
    let claims = Claims {
        subject: subject.clone(),
        token_use: class,
        jti: Uuid::new_v4(),
        iat,
        exp,
    };

    let token = encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))?;

    Ok(IssuedCredential { token, claims })
}

/// Verify signature, class and expiry of `token`.
///
/// Signature is checked first, so a forged token reports `InvalidSignature`
/// even when also expired. Expiry uses the caller's clock with no leeway:
/// a token is rejected once `now > exp`.
pub fn verify(
    token: &str,
    class: CredentialClass,
    secret: &[u8],
    now: SystemTime,
) -> Result<Claims, AuthFailure> {
    let mut validation = Validation::new(ALGORITHM);
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidSignature => AuthFailure::InvalidSignature,
            _ => AuthFailure::Malformed,
        })?;

    if claims.token_use != class {
        return Err(AuthFailure::WrongClass);
    }

    let now = unix_seconds(now).map_err(|_| AuthFailure::Expired)?;
    if now > claims.exp {
        return Err(AuthFailure::Expired);
    }

    Ok(claims)
}

/// Issue a `class` credential for `user` with the configured key and lifetime.
pub fn mint_credential(
    user: &User,
    class: CredentialClass,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<IssuedCredential, AppError> {
    let key = security.key(class);
    issue(&SubjectClaims::from(user), class, &key.secret, key.ttl, now)
}

pub fn verify_credential(
    token: &str,
    class: CredentialClass,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, AuthFailure> {
    verify(token, class, &security.key(class).secret, now)
}
