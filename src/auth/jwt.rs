use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by the access tokens this service issues.
///
/// `sub` is the owner's UUID; tokens are HS256-signed with the configured
/// `JWT_SECRET`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The owner UUID.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
    /// Token issued-at (Unix timestamp).
    pub iat: Option<usize>,
    pub email: Option<String>,
}

impl Claims {
    pub fn new(owner_id: Uuid, email: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: owner_id.to_string(),
            exp: (issued_at + ttl).timestamp().max(0) as usize,
            iat: Some(issued_at.timestamp().max(0) as usize),
            email: Some(email.to_string()),
        }
    }

    /// Extract the owner UUID from the `sub` claim.
    pub fn owner_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }
}

/// Sign a token for `owner_id`, returning it with its expiry instant.
pub fn issue_token(
    owner_id: Uuid,
    email: &str,
    secret: &str,
    ttl: Duration,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims::new(owner_id, email, now, ttl);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, now + ttl))
}

/// Validate an HS256 token against `secret` and return the decoded claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|td| td.claims)
        .map_err(|e| format!("Token validation failed: {e}"))
}
