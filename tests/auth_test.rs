///! Integration test for JWT issuance and validation.
///!
///! Tokens are minted locally with the same HS256 secret the server would use
///! and checked through `validate_token`. No running server or database is
///! needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use aluguei_backend::auth::jwt::{Claims, issue_token, validate_token};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

fn encode_claims(claims: &Claims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to encode test JWT")
}

#[test]
fn test_issued_token_round_trips() {
    let owner_id = Uuid::new_v4();
    let (token, expires_at) =
        issue_token(owner_id, "alice@example.com", TEST_SECRET, Duration::hours(24))
            .expect("Token should be issued");

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, owner_id.to_string());
    assert_eq!(claims.owner_id().unwrap(), owner_id);
    assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
    assert_eq!(claims.exp as i64, expires_at.timestamp());
    assert!(expires_at > Utc::now() + Duration::hours(23));
}

#[test]
fn test_expired_token_is_rejected() {
    // Expired 5 minutes ago, well past the 60s default leeway.
    let claims = Claims::new(
        Uuid::new_v4(),
        "expired@example.com",
        Utc::now() - Duration::hours(1),
        Duration::minutes(55),
    );
    let token = encode_claims(&claims);

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let (token, _) = issue_token(
        Uuid::new_v4(),
        "bob@example.com",
        TEST_SECRET,
        Duration::hours(1),
    )
    .unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_non_uuid_subject_is_rejected() {
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: "owner-42".to_string(),
        exp: now + 3600,
        iat: Some(now),
        email: None,
    };
    let token = encode_claims(&claims);

    // The signature is fine, the subject is not.
    let decoded = validate_token(&token, TEST_SECRET).expect("Token should be valid");
    assert!(decoded.owner_id().is_err());
}
