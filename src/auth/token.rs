use std::collections::HashSet;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::claims::{ClaimSet, Claims};
use super::error::AuthError;
use super::password::CredentialHasher;
use crate::config::SecurityConfig;
use crate::database::{UserRecord, UserStore};

/// Token endpoint response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer".to_string(),
        }
    }
}

/// Issues and validates signed, time-limited bearer tokens.
///
/// Holds the process-wide key material; built once at startup from
/// [`SecurityConfig`] and shared read-only between requests.
pub struct TokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    ttl: Duration,
    hasher: CredentialHasher,
    // Verified against when the login identifier is unknown, so both paths
    // pay for one Argon2 verification.
    dummy_digest: OnceLock<Option<String>>,
}

impl TokenAuthority {
    pub fn new(security: &SecurityConfig) -> Self {
        let mut validation = Validation::new(security.algorithm);
        // Expiry is compared against the caller's clock in `resolve_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::from(["exp".to_string()]);

        Self {
            encoding_key: EncodingKey::from_secret(security.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(security.secret_key.as_bytes()),
            algorithm: security.algorithm,
            validation,
            // Lifetimes beyond chrono's range clamp to the maximum; `issue_at` then
            // fails with `Signing`.
            ttl: Duration::try_minutes(security.access_token_expire_minutes)
                .unwrap_or(Duration::MAX),
            hasher: CredentialHasher::new(),
            dummy_digest: OnceLock::new(),
        }
    }

    pub fn hasher(&self) -> &CredentialHasher {
        &self.hasher
    }

    pub fn issue(&self, claims: ClaimSet) -> Result<AccessToken, AuthError> {
        self.issue_at(claims, Utc::now())
    }

    /// Sign `claims` with `exp = now + ttl`. Any expiry the caller had in mind is overwritten.
    pub fn issue_at(&self, claims: ClaimSet, now: DateTime<Utc>) -> Result<AccessToken, AuthError> {
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AuthError::Signing(format!("token lifetime {} overflows the clock", self.ttl))
        })?;

        let payload = Claims {
            sub: claims.sub,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(self.algorithm), &payload, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        Ok(AccessToken::bearer(token))
    }

    /// Verify signature, algorithm and structure. Expiry is not checked here.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                warn!("Rejected bearer token: {}", e);
                AuthError::InvalidCredentials
            })
    }

    pub async fn resolve<S>(&self, token: &str, store: &S) -> Result<UserRecord, AuthError>
    where
        S: UserStore + ?Sized,
    {
        self.resolve_at(token, store, Utc::now()).await
    }

    /// Resolve the identity a token speaks for, as of `now`.
    ///
    /// Signature first, then expiry, then subject lookup. The user is fetched
    /// from `store` on every call.
    pub async fn resolve_at<S>(
        &self,
        token: &str,
        store: &S,
        now: DateTime<Utc>,
    ) -> Result<UserRecord, AuthError>
    where
        S: UserStore + ?Sized,
    {
        let claims = self.decode(token)?;

        if now.timestamp() >= claims.exp {
            warn!("Rejected bearer token: expired at {}", claims.exp);
            return Err(AuthError::TokenExpired);
        }

        let subject = match claims.sub {
            Some(sub) if !sub.is_empty() => sub,
            _ => {
                warn!("Rejected bearer token: no subject claim");
                return Err(AuthError::InvalidCredentials);
            }
        };

        match store.find_by_identifier(&subject).await? {
            Some(user) => {
                debug!("Resolved bearer token to user {}", user.id);
                Ok(user)
            }
            None => {
                warn!("Rejected bearer token: subject matches no user");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Exchange an e-mail/password pair for a token.
    ///
    /// Unknown e-mail and wrong password both yield `InvalidCredentials`.
    pub async fn authenticate<S>(
        &self,
        identifier: &str,
        password: &str,
        store: &S,
    ) -> Result<AccessToken, AuthError>
    where
        S: UserStore + ?Sized,
    {
        let Some(user) = store.find_by_identifier(identifier).await? else {
            if let Some(digest) = self.dummy_digest() {
                let _ = self.hasher.verify(password, digest);
            }
            warn!("Login rejected: unknown identifier");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password) {
            warn!("Login rejected: password mismatch for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        info!("Issued access token for user {}", user.id);
        self.issue(ClaimSet::for_subject(user.email))
    }

    /// Issue a fresh token for an identity that was already resolved for this request.
    pub fn refresh(&self, identity: &UserRecord) -> Result<AccessToken, AuthError> {
        info!("Refreshed access token for user {}", identity.id);
        self.issue(ClaimSet::for_subject(identity.email.clone()))
    }

    fn dummy_digest(&self) -> Option<&str> {
        self.dummy_digest
            .get_or_init(|| self.hasher.hash("unknown-user-placeholder").ok())
            .as_deref()
    }
}
