//! Authentication service
//!
//! Issues and verifies HS256 session tokens. Tokens are stateless: a token is
//! good until its `exp` as long as the signature holds and its subject still
//! resolves to a user.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use postbox_core::ports::CredentialStore;
use postbox_core::validation::{validate_email, validate_password};
use postbox_core::{PostboxError, Result, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

pub const DEFAULT_TOKEN_TTL: std::time::Duration = std::time::Duration::from_secs(3600);

pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: std::time::Duration,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        jwt_secret: &str,
        token_ttl: std::time::Duration,
    ) -> Self {
        Self {
            store,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl,
        }
    }

    pub async fn signup(&self, email: &str, password: &str) -> Result<String> {
        validate_email(email)?;
        validate_password(password)?;

        let user = self.store.create_user(email, password).await?;
        info!("Registered user {} ({})", user.id, user.email);

        self.issue(user.id)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        validate_email(email)?;

        let user = self
            .store
            .authenticate(email, password)
            .await?
            .ok_or(PostboxError::InvalidCredentials)?;
        info!("User {} logged in", user.id);

        self.issue(user.id)
    }

    /// Sign a token for `user_id`, valid for the configured TTL from now.
    pub fn issue(&self, user_id: i64) -> Result<String> {
        self.issue_at(user_id, Utc::now())
    }

    fn issue_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String> {
        let expires_at = Duration::from_std(self.token_ttl)
            .ok()
            .and_then(|ttl| issued_at.checked_add_signed(ttl))
            .ok_or_else(|| PostboxError::Token("token lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| PostboxError::Token(e.to_string()))
    }

    /// Resolve a token to its user.
    pub async fn verify(&self, token: &str) -> Result<User> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                debug!("Token rejected: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => PostboxError::TokenExpired,
                    _ => PostboxError::TokenInvalid,
                }
            })?;

        let user_id: i64 = token_data
            .claims
            .sub
            .parse()
            .map_err(|_| PostboxError::TokenInvalid)?;

        self.store
            .find_user_by_id(user_id)
            .await?
            .ok_or(PostboxError::TokenInvalid)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,    // expiration time
    iat: i64,    // issued at
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    async fn service() -> (AuthService, Arc<Database>) {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let service = AuthService::new(db.clone(), "test-secret", DEFAULT_TOKEN_TTL);
        (service, db)
    }

    #[tokio::test]
    async fn test_signup_token_resolves_to_user() {
        let (auth, db) = service().await;

        let token = auth.signup("a@x.com", "secret1").await.unwrap();
        let user = auth.verify(&token).await.unwrap();

        assert_eq!(user.email, "a@x.com");
        assert_eq!(db.find_user_by_id(user.id).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let (auth, _db) = service().await;

        auth.signup("a@x.com", "secret1").await.unwrap();
        let err = auth.signup("a@x.com", "secret2").await.unwrap_err();
        assert!(matches!(err, PostboxError::DuplicateEmail));
    }

    #[tokio::test]
    async fn test_signup_validates_input() {
        let (auth, _db) = service().await;

        let err = auth.signup("not-an-email", "secret1").await.unwrap_err();
        assert!(matches!(err, PostboxError::Validation(_)));

        let err = auth.signup("a@x.com", "short").await.unwrap_err();
        assert!(matches!(err, PostboxError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login() {
        let (auth, _db) = service().await;
        auth.signup("a@x.com", "secret1").await.unwrap();

        let token = auth.login("a@x.com", "secret1").await.unwrap();
        assert_eq!(auth.verify(&token).await.unwrap().email, "a@x.com");

        let err = auth.login("a@x.com", "secret2").await.unwrap_err();
        assert!(matches!(err, PostboxError::InvalidCredentials));

        let err = auth.login("b@x.com", "secret1").await.unwrap_err();
        assert!(matches!(err, PostboxError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (auth, db) = service().await;
        let user = db.create_user("a@x.com", "secret1").await.unwrap();

        let token = auth
            .issue_at(user.id, Utc::now() - Duration::hours(2))
            .unwrap();
        let err = auth.verify(&token).await.unwrap_err();
        assert!(matches!(err, PostboxError::TokenExpired));

        // Still inside its lifetime
        let token = auth
            .issue_at(user.id, Utc::now() - Duration::minutes(59))
            .unwrap();
        assert_eq!(auth.verify(&token).await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_tampered_and_malformed_tokens() {
        let (auth, db) = service().await;
        let user = db.create_user("a@x.com", "secret1").await.unwrap();
        let token = auth.issue(user.id).unwrap();

        // Flip one character of the signature
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        for bad in [tampered.as_str(), "", "garbage", "a.b.c"] {
            let err = auth.verify(bad).await.unwrap_err();
            assert!(matches!(err, PostboxError::TokenInvalid), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn test_token_from_other_secret() {
        let (auth, db) = service().await;
        let user = db.create_user("a@x.com", "secret1").await.unwrap();

        let other = AuthService::new(db.clone(), "other-secret", DEFAULT_TOKEN_TTL);
        let token = other.issue(user.id).unwrap();

        let err = auth.verify(&token).await.unwrap_err();
        assert!(matches!(err, PostboxError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let (auth, _db) = service().await;

        let token = auth.issue(999).unwrap();
        let err = auth.verify(&token).await.unwrap_err();
        assert!(matches!(err, PostboxError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_unrepresentable_lifetime_is_an_error() {
        let db = Arc::new(Database::in_memory().await.unwrap());
        let auth = AuthService::new(db, "test-secret", std::time::Duration::MAX);

        let err = auth.issue(1).unwrap_err();
        assert!(matches!(err, PostboxError::Token(_)));
    }

    #[tokio::test]
    async fn test_non_numeric_subject() {
        let (auth, _db) = service().await;

        let claims = Claims {
            sub: "alice".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        let token = encode(&Header::default(), &claims, &auth.encoding_key).unwrap();

        let err = auth.verify(&token).await.unwrap_err();
        assert!(matches!(err, PostboxError::TokenInvalid));
    }
}
