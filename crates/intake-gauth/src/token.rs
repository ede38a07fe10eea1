//! Bearer-token provider backed by the OAuth 2.0 JWT grant flow.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::{AuthError, ServiceAccountKey};

const JWT_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Lifetime requested for the signed assertion (Google's maximum).
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_LEEWAY_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct GrantClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_LEEWAY_SECS) > now
    }
}

/// Signs JWT grants with the service-account key and caches the resulting
/// access token until shortly before expiry.
pub struct TokenProvider {
    key: ServiceAccountKey,
    scope: String,
    client: reqwest::Client,
    cache: RwLock<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(key: ServiceAccountKey, scopes: &[&str]) -> Self {
        Self {
            key,
            scope: scopes.join(" "),
            client: reqwest::Client::new(),
            cache: RwLock::new(None),
        }
    }

    pub fn from_key_file(path: &str, scopes: &[&str]) -> Result<Self, AuthError> {
        Ok(Self::new(ServiceAccountKey::from_file(path)?, scopes))
    }

    /// Current bearer token, exchanging a fresh grant when the cached one
    /// is missing or about to expire.
    pub async fn bearer_token(&self) -> Result<String, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_fresh(Utc::now()) {
                    return Ok(cached.token.clone());
                }
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(cached) = cache.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.token.clone());
            }
        }

        let (token, expires_at) = self.exchange().await?;
        tracing::debug!(
            client_email = %self.key.client_email,
            expires_at = %expires_at,
            "Obtained fresh access token"
        );
        *cache = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });
        Ok(token)
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| AuthError::Sign(format!("Invalid private key: {}", e)))?;
        let claims = GrantClaims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| AuthError::Sign(e.to_string()))
    }

    async fn exchange(&self) -> Result<(String, DateTime<Utc>), AuthError> {
        let assertion = self.sign_assertion(Utc::now())?;
        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", JWT_GRANT_TYPE),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Exchange(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Exchange(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Exchange(format!("Invalid token response: {}", e)))?;
        let expires_at = Utc::now() + Duration::seconds(token.expires_in);
        Ok((token.access_token, expires_at))
    }
}
