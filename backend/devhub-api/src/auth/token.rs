/// JWT issuance and validation for devhub-api
///
/// Tokens are signed with HS256 using a shared secret: this is a single
/// service validating its own tokens, so there is no cross-service key
/// distribution to manage. The secret is loaded once at startup and held in a
/// `OnceCell`.
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;
const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 30;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims: standard claims plus the token type discriminator.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: "access" or "refresh"
    pub token_type: String,
}

/// Access/refresh token pair returned by auth endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

static JWT_KEYS: OnceCell<(EncodingKey, DecodingKey)> = OnceCell::new();

/// Initialize the signing secret. Must be called during startup before any
/// token operation; later calls with a different secret are rejected.
pub fn init(secret: &str) -> Result<()> {
    if secret.trim().is_empty() {
        return Err(AppError::Internal("JWT secret must not be empty".into()));
    }

    JWT_KEYS
        .set((
            EncodingKey::from_secret(secret.as_bytes()),
            DecodingKey::from_secret(secret.as_bytes()),
        ))
        .map_err(|_| AppError::Internal("JWT keys already initialized".into()))
}

fn keys() -> Result<&'static (EncodingKey, DecodingKey)> {
    JWT_KEYS
        .get()
        .ok_or_else(|| AppError::Internal("JWT keys not initialized".into()))
}

fn generate(user_id: Uuid, token_type: &str, ttl: Duration) -> Result<String> {
    let (encoding_key, _) = keys()?;
    let now = Utc::now();

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
        token_type: token_type.to_string(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Issue an access/refresh pair for the given user.
pub fn issue_pair(user_id: Uuid) -> Result<TokenPair> {
    let access_ttl = Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS);
    let refresh_ttl = Duration::days(REFRESH_TOKEN_EXPIRY_DAYS);

    Ok(TokenPair {
        access_token: generate(user_id, "access", access_ttl)?,
        refresh_token: generate(user_id, "refresh", refresh_ttl)?,
        token_type: "Bearer".to_string(),
        expires_in: access_ttl.num_seconds(),
    })
}

/// Validate a token's signature and expiry, returning its claims.
pub fn validate(token: &str) -> Result<Claims> {
    let (_, decoding_key) = keys()?;
    let validation = Validation::new(JWT_ALGORITHM);

    decode::<Claims>(token, decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))
}

/// Validate an access token and extract the user id.
pub fn authenticate(token: &str) -> Result<Uuid> {
    let claims = validate(token)?;

    if claims.token_type != "access" {
        return Err(AppError::Unauthorized("Not an access token".into()));
    }

    Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized("Invalid subject".into()))
}

/// Validate a refresh token and extract the user id.
pub fn authenticate_refresh(token: &str) -> Result<Uuid> {
    let claims = validate(token)?;

    if claims.token_type != "refresh" {
        return Err(AppError::Unauthorized("Not a refresh token".into()));
    }

    Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized("Invalid subject".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_keys() {
        // Tests share the process-wide OnceCell; first init wins.
        let _ = init("devhub-test-secret");
    }

    #[test]
    fn issue_and_validate_pair() {
        init_test_keys();
        let user_id = Uuid::new_v4();
        let pair = issue_pair(user_id).expect("pair should be issued");

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 3600);
        assert_eq!(authenticate(&pair.access_token).unwrap(), user_id);
        assert_eq!(authenticate_refresh(&pair.refresh_token).unwrap(), user_id);
    }

    #[test]
    fn access_token_rejected_as_refresh() {
        init_test_keys();
        let pair = issue_pair(Uuid::new_v4()).expect("pair should be issued");
        assert!(authenticate_refresh(&pair.access_token).is_err());
        assert!(authenticate(&pair.refresh_token).is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        init_test_keys();
        assert!(authenticate("not-a-jwt").is_err());
    }

    #[test]
    fn tampered_token_rejected() {
        init_test_keys();
        let pair = issue_pair(Uuid::new_v4()).expect("pair should be issued");
        let mut tampered = pair.access_token.clone();
        tampered.pop();
        tampered.push('x');
        assert!(authenticate(&tampered).is_err());
    }

    #[test]
    fn empty_secret_rejected() {
        assert!(init("   ").is_err());
    }
}
