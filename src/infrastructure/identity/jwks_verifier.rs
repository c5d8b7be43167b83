//! JWT verification against the identity provider's rotating public keys

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header, errors::ErrorKind};
use moka::future::Cache;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::auth::{AuthError, TokenVerifier, VerifiedToken};
use crate::infrastructure::config::AuthConfig;

const JWKS_KEY: &str = "jwks";

/// JWKS (JSON Web Key Set) document
#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
  pub keys: Vec<Jwk>,
}

impl Jwks {
  fn into_key_set(self) -> KeySet {
    self
      .keys
      .into_iter()
      .filter_map(|jwk| match jwk.decoding_key() {
        Some(key) => Some((jwk.kid, Arc::new(key))),
        None => {
          tracing::debug!(kid = %jwk.kid, kty = %jwk.kty, "Skipping unusable JWK");
          None
        }
      })
      .collect()
  }
}

/// Individual JWK; only RSA keys carry `n` and `e`
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
  pub kid: String,
  pub kty: String,
  #[serde(default)]
  pub alg: Option<String>,
  #[serde(default)]
  pub n: Option<String>,
  #[serde(default)]
  pub e: Option<String>,
}

impl Jwk {
  fn decoding_key(&self) -> Option<DecodingKey> {
    if self.kty != "RSA" {
      return None;
    }
    let (n, e) = (self.n.as_deref()?, self.e.as_deref()?);
    DecodingKey::from_rsa_components(n, e).ok()
  }
}

/// Session token claims we rely on
#[derive(Debug, Clone, Deserialize)]
struct SessionClaims {
  sub: String,
  iss: String,
  exp: i64,
  #[serde(default)]
  azp: Option<String>,
}

/// Decoding keys of the last fetched JWKS, by `kid`
type KeySet = HashMap<String, Arc<DecodingKey>>;

/// Token verifier with JWKS caching
///
/// The provider's key set is cached for `jwks_cache_ttl_seconds`. A token
/// whose `kid` is missing from the cached set triggers one refetch, so keys
/// rotated in by the provider are picked up straight away; further refetches
/// wait out `min_refetch_interval_seconds` so a flood of forged `kid`s cannot
/// hammer the provider. Concurrent misses share a single fetch.
#[derive(Clone)]
pub struct JwksTokenVerifier {
  issuer: String,
  jwks_url: String,
  authorized_parties: Vec<String>,
  leeway_seconds: u64,
  http_client: reqwest::Client,
  key_set: Cache<&'static str, Arc<KeySet>>,
  /// Present while a fetch happened within the refetch interval
  recent_fetch: Cache<&'static str, ()>,
}

impl JwksTokenVerifier {
  pub fn new(config: &AuthConfig) -> Self {
    let http_client = reqwest::Client::builder()
      .connect_timeout(Duration::from_secs(5))
      .timeout(Duration::from_secs(config.request_timeout_seconds))
      .pool_idle_timeout(Duration::from_secs(90))
      .build()
      .unwrap_or_else(|_| reqwest::Client::new());

    Self::with_client(config, http_client)
  }

  /// Create a verifier sharing an existing HTTP client
  pub fn with_client(config: &AuthConfig, http_client: reqwest::Client) -> Self {
    Self {
      issuer: config.issuer.clone(),
      jwks_url: config.jwks_url.clone(),
      authorized_parties: config.authorized_parties.clone(),
      leeway_seconds: config.leeway_seconds,
      http_client,
      key_set: Cache::builder()
        .time_to_live(Duration::from_secs(config.jwks_cache_ttl_seconds))
        .max_capacity(1)
        .build(),
      recent_fetch: Cache::builder()
        .time_to_live(Duration::from_secs(config.min_refetch_interval_seconds))
        .max_capacity(1)
        .build(),
    }
  }

  /// Drop all cached keys, forcing a fresh JWKS fetch on the next request
  pub fn invalidate_cache(&self) {
    self.key_set.invalidate_all();
    self.recent_fetch.invalidate_all();
  }

  fn validation(&self) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[self.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation.validate_aud = false;
    validation.validate_nbf = true;
    validation.leeway = self.leeway_seconds;
    validation
  }

  async fn get_key(&self, kid: &str) -> Result<Arc<DecodingKey>, AuthError> {
    if let Some(key) = self.load_key_set().await?.get(kid) {
      return Ok(key.clone());
    }

    // The provider may have rotated in a new key since the last fetch
    let refetch_allowed = self
      .recent_fetch
      .entry(JWKS_KEY)
      .or_insert(())
      .await
      .is_fresh();
    if !refetch_allowed {
      tracing::debug!(kid, "Unknown key id, JWKS fetched recently");
      return Err(AuthError::UnknownSigningKey(kid.to_string()));
    }

    tracing::info!(kid, "Unknown key id, refetching JWKS");
    self.key_set.invalidate(JWKS_KEY).await;
    self
      .load_key_set()
      .await?
      .get(kid)
      .cloned()
      .ok_or_else(|| AuthError::UnknownSigningKey(kid.to_string()))
  }

  /// Cached key set, fetched on a miss; concurrent callers share the fetch
  async fn load_key_set(&self) -> Result<Arc<KeySet>, AuthError> {
    self
      .key_set
      .try_get_with(JWKS_KEY, async {
        let jwks = self.fetch_jwks().await?;
        self.recent_fetch.insert(JWKS_KEY, ()).await;
        Ok::<_, AuthError>(Arc::new(jwks.into_key_set()))
      })
      .await
      .map_err(|e| match e.as_ref() {
        AuthError::ProviderUnavailable(reason) => AuthError::ProviderUnavailable(reason.clone()),
        other => AuthError::ProviderUnavailable(other.to_string()),
      })
  }

  async fn fetch_jwks(&self) -> Result<Jwks, AuthError> {
    tracing::debug!(url = %self.jwks_url, "Fetching JWKS");

    let response = self
      .http_client
      .get(&self.jwks_url)
      .send()
      .await
      .map_err(|e| {
        tracing::error!("Failed to fetch JWKS: {}", e);
        AuthError::ProviderUnavailable("failed to fetch JWKS".to_string())
      })?;

    if !response.status().is_success() {
      tracing::error!("JWKS fetch returned status: {}", response.status());
      return Err(AuthError::ProviderUnavailable(format!(
        "JWKS endpoint returned {}",
        response.status()
      )));
    }

    response.json::<Jwks>().await.map_err(|e| {
      tracing::error!("Failed to parse JWKS: {}", e);
      AuthError::ProviderUnavailable("failed to parse JWKS".to_string())
    })
  }

  fn check_authorized_party(&self, azp: Option<&str>) -> Result<(), AuthError> {
    match azp {
      Some(party) if !self.authorized_parties.is_empty() => {
        if self.authorized_parties.iter().any(|allowed| allowed == party) {
          Ok(())
        } else {
          Err(AuthError::UnauthorizedParty(party.to_string()))
        }
      }
      _ => Ok(()),
    }
  }
}

#[async_trait]
impl TokenVerifier for JwksTokenVerifier {
  async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
    let header = decode_header(token).map_err(|e| {
      tracing::debug!("Failed to decode token header: {}", e);
      AuthError::MalformedToken(e.to_string())
    })?;

    let kid = header
      .kid
      .ok_or_else(|| AuthError::MalformedToken("token header has no kid".to_string()))?;

    let key = self.get_key(&kid).await?;

    let data = decode::<SessionClaims>(token, &key, &self.validation()).map_err(|e| {
      tracing::debug!("Token validation failed: {}", e);
      match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer => AuthError::InvalidToken("issuer mismatch".to_string()),
        ErrorKind::ImmatureSignature => AuthError::InvalidToken("token not yet valid".to_string()),
        ErrorKind::InvalidSignature => AuthError::InvalidToken("bad signature".to_string()),
        _ => AuthError::InvalidToken(e.to_string()),
      }
    })?;

    let claims = data.claims;
    self.check_authorized_party(claims.azp.as_deref())?;

    Ok(VerifiedToken {
      subject: claims.sub,
      issuer: claims.iss,
      expires_at: claims.exp,
      authorized_party: claims.azp,
    })
  }
}

impl std::fmt::Debug for JwksTokenVerifier {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JwksTokenVerifier")
      .field("issuer", &self.issuer)
      .field("jwks_url", &self.jwks_url)
      .finish_non_exhaustive()
  }
}
