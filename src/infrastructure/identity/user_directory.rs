use async_trait::async_trait;
use moka::future::Cache;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::auth::{AuthError, Identity, IdentityDirectory};
use crate::infrastructure::config::AuthConfig;

/// User record as returned by the provider's `GET /users/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
  pub id: String,
  #[serde(default)]
  pub primary_email_address_id: Option<String>,
  #[serde(default)]
  pub email_addresses: Vec<ProviderEmailAddress>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEmailAddress {
  pub id: String,
  pub email_address: String,
}

impl ProviderUser {
  /// The address flagged as primary, or the first listed one
  pub fn primary_email(&self) -> Option<&str> {
    let primary = self.primary_email_address_id.as_deref().and_then(|primary_id| {
      self
        .email_addresses
        .iter()
        .find(|address| address.id == primary_id)
    });

    primary
      .or_else(|| self.email_addresses.first())
      .map(|address| address.email_address.as_str())
      .filter(|email| !email.trim().is_empty())
  }
}

/// Identity directory backed by the provider's backend user API
///
/// Profiles are cached per subject for `profile_cache_ttl_seconds`.
#[derive(Clone)]
pub struct ProviderUserDirectory {
  api_url: String,
  secret_key: String,
  http_client: reqwest::Client,
  profile_cache: Cache<String, Identity>,
}

impl ProviderUserDirectory {
  pub fn new(config: &AuthConfig) -> Self {
    let http_client = reqwest::Client::builder()
      .connect_timeout(Duration::from_secs(5))
      .timeout(Duration::from_secs(config.request_timeout_seconds))
      .build()
      .unwrap_or_else(|_| reqwest::Client::new());

    Self::with_client(config, http_client)
  }

  pub fn with_client(config: &AuthConfig, http_client: reqwest::Client) -> Self {
    Self {
      api_url: config.api_url.clone(),
      secret_key: config.secret_key.clone(),
      http_client,
      profile_cache: Cache::builder()
        .time_to_live(Duration::from_secs(config.profile_cache_ttl_seconds))
        .max_capacity(10_000)
        .build(),
    }
  }

  fn user_url(&self, subject: &str) -> Result<Url, AuthError> {
    let mut url = Url::parse(&self.api_url)
      .map_err(|e| AuthError::ProviderUnavailable(format!("invalid user API url: {}", e)))?;

    url
      .path_segments_mut()
      .map_err(|_| AuthError::ProviderUnavailable("user API url cannot be a base".to_string()))?
      .pop_if_empty()
      .push("users")
      .push(subject);

    Ok(url)
  }

  async fn fetch_user(&self, subject: &str) -> Result<ProviderUser, AuthError> {
    let url = self.user_url(subject)?;

    let response = self
      .http_client
      .get(url)
      .bearer_auth(&self.secret_key)
      .send()
      .await
      .map_err(|e| {
        tracing::error!("Failed to reach user API: {}", e);
        AuthError::ProviderUnavailable("failed to reach user API".to_string())
      })?;

    match response.status() {
      status if status.is_success() => {}
      StatusCode::NOT_FOUND => {
        tracing::warn!(subject, "Token subject unknown to identity provider");
        return Err(AuthError::UserNotFound);
      }
      status => {
        tracing::error!(subject, "User API returned status: {}", status);
        return Err(AuthError::ProviderUnavailable(format!(
          "user API returned {}",
          status
        )));
      }
    }

    response.json::<ProviderUser>().await.map_err(|e| {
      tracing::error!("Failed to parse user API response: {}", e);
      AuthError::ProviderUnavailable("failed to parse user API response".to_string())
    })
  }
}

#[async_trait]
impl IdentityDirectory for ProviderUserDirectory {
  async fn lookup(&self, subject: &str) -> Result<Identity, AuthError> {
    if let Some(identity) = self.profile_cache.get(subject).await {
      return Ok(identity);
    }

    let user = self.fetch_user(subject).await?;
    let email = user
      .primary_email()
      .ok_or_else(|| AuthError::IncompleteProfile(format!("user {} has no email address", user.id)))?;

    let identity = Identity {
      external_id: user.id.clone(),
      email: email.to_string(),
    };

    self
      .profile_cache
      .insert(subject.to_string(), identity.clone())
      .await;

    Ok(identity)
  }
}

impl std::fmt::Debug for ProviderUserDirectory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ProviderUserDirectory")
      .field("api_url", &self.api_url)
      .field("secret_key", &"[REDACTED]")
      .finish_non_exhaustive()
  }
}
