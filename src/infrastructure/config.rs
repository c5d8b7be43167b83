use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::fmt;

// Default timeout functions
fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_jwks_cache_ttl() -> u64 {
  3600
}

fn default_min_refetch_interval() -> u64 {
  60
}

fn default_profile_cache_ttl() -> u64 {
  300
}

fn default_request_timeout() -> u64 {
  10
}

fn default_leeway() -> u64 {
  5
}

fn default_allowed_origins() -> Vec<String> {
  vec![
    "http://localhost:3000".to_string(),
    "http://127.0.0.1:3000".to_string(),
    "http://localhost:5173".to_string(),
  ]
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  pub auth: AuthConfig,
  #[serde(default)]
  pub cors: CorsConfig,
  #[serde(default)]
  pub rate_limit: Option<RateLimitConfig>,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  pub url: String,
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Identity provider configuration
#[derive(Clone, Deserialize)]
pub struct AuthConfig {
  /// Expected `iss` claim, e.g. `https://example.clerk.accounts.dev`
  pub issuer: String,
  /// Location of the provider's public key set
  pub jwks_url: String,
  /// Base URL of the provider's user API, e.g. `https://api.clerk.com/v1`
  pub api_url: String,
  /// Server-side secret used to call the user API
  pub secret_key: String,
  /// Accepted `azp` values; empty accepts any
  #[serde(default)]
  pub authorized_parties: Vec<String>,
  #[serde(default = "default_jwks_cache_ttl")]
  pub jwks_cache_ttl_seconds: u64,
  /// Minimum gap between JWKS fetches triggered by an unknown `kid`
  #[serde(default = "default_min_refetch_interval")]
  pub min_refetch_interval_seconds: u64,
  #[serde(default = "default_profile_cache_ttl")]
  pub profile_cache_ttl_seconds: u64,
  #[serde(default = "default_request_timeout")]
  pub request_timeout_seconds: u64,
  /// Clock skew tolerated when checking `exp` and `nbf`
  #[serde(default = "default_leeway")]
  pub leeway_seconds: u64,
}

impl fmt::Debug for AuthConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AuthConfig")
      .field("issuer", &self.issuer)
      .field("jwks_url", &self.jwks_url)
      .field("api_url", &self.api_url)
      .field("secret_key", &"[REDACTED]")
      .field("authorized_parties", &self.authorized_parties)
      .field("jwks_cache_ttl_seconds", &self.jwks_cache_ttl_seconds)
      .field(
        "min_refetch_interval_seconds",
        &self.min_refetch_interval_seconds,
      )
      .field("profile_cache_ttl_seconds", &self.profile_cache_ttl_seconds)
      .field("request_timeout_seconds", &self.request_timeout_seconds)
      .field("leeway_seconds", &self.leeway_seconds)
      .finish()
  }
}

/// Cross-origin request configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
  #[serde(default = "default_allowed_origins")]
  pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
  fn default() -> Self {
    Self {
      allowed_origins: default_allowed_origins(),
    }
  }
}

/// Per-client rate limiting for the API
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
  /// Milliseconds after which one request of the quota is replenished
  pub replenish_interval_ms: u64,
  pub burst_size: u32,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with EXPENSE_TRACKER_ prefix
  /// 5. `DATABASE_URL`, if set
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the EXPENSE_TRACKER_ prefix and are separated by double underscores:
  /// - `EXPENSE_TRACKER_SERVER__PORT=8080`
  /// - `EXPENSE_TRACKER_DATABASE__MAX_CONNECTIONS=10`
  /// - `EXPENSE_TRACKER_AUTH__ISSUER=https://example.clerk.accounts.dev`
  /// - `EXPENSE_TRACKER_AUTH__SECRET_KEY=sk_live_...`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if the default file is missing, a file contains
  /// invalid TOML, or a required value is missing or has the wrong type.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("EXPENSE_TRACKER")
          .prefix_separator("_")
          .separator("__")
          .list_separator(",")
          .with_list_parse_key("auth.authorized_parties")
          .with_list_parse_key("cors.allowed_origins")
          .try_parsing(true),
      )
      // Hosting platforms hand out the connection string as DATABASE_URL
      .set_override_option("database.url", env::var("DATABASE_URL").ok())?
      .build()?;

    let config: Self = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
  }

  /// Reject values that deserialize fine but cannot be acted on
  pub fn validate(&self) -> Result<(), ConfigError> {
    if let Some(rate_limit) = &self.rate_limit {
      if rate_limit.replenish_interval_ms == 0 || rate_limit.burst_size == 0 {
        return Err(ConfigError::Message(
          "rate_limit.replenish_interval_ms and rate_limit.burst_size must be greater than zero"
            .to_string(),
        ));
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const MINIMAL: &str = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [database]
            url = "postgres://localhost/expenses"
            max_connections = 5

            [auth]
            issuer = "https://example.clerk.accounts.dev"
            jwks_url = "https://example.clerk.accounts.dev/.well-known/jwks.json"
            api_url = "https://api.clerk.com/v1"
            secret_key = "sk_test_secret"
        "#;

  #[test]
  fn test_config_structure() {
    let config: Config = toml::from_str(MINIMAL).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.database.url, "postgres://localhost/expenses");
    assert_eq!(config.database.max_connections, 5);
    assert_eq!(config.database.connect_timeout_seconds, 5); // default
    assert_eq!(config.database.acquire_timeout_seconds, 3); // default
    assert_eq!(config.auth.issuer, "https://example.clerk.accounts.dev");
    assert_eq!(config.auth.jwks_cache_ttl_seconds, 3600);
    assert_eq!(config.auth.min_refetch_interval_seconds, 60);
    assert_eq!(config.auth.profile_cache_ttl_seconds, 300);
    assert_eq!(config.auth.leeway_seconds, 5);
    assert!(config.auth.authorized_parties.is_empty());
    assert_eq!(config.cors.allowed_origins.len(), 3);
    assert!(config.rate_limit.is_none());
  }

  #[test]
  fn test_config_optional_sections() {
    let toml = format!(
      r#"{}
            [cors]
            allowed_origins = ["https://app.example.com"]

            [rate_limit]
            replenish_interval_ms = 100
            burst_size = 20
        "#,
      MINIMAL
    );

    let config: Config = toml::from_str(&toml).expect("Failed to parse config");

    assert_eq!(config.cors.allowed_origins, vec!["https://app.example.com"]);
    assert!(config.validate().is_ok());
    let rate_limit = config.rate_limit.expect("rate limit section");
    assert_eq!(rate_limit.replenish_interval_ms, 100);
    assert_eq!(rate_limit.burst_size, 20);
  }

  #[test]
  fn test_zero_rate_limit_is_rejected() {
    for (interval, burst) in [(0, 20), (100, 0)] {
      let toml = format!(
        r#"{}
            [rate_limit]
            replenish_interval_ms = {}
            burst_size = {}
        "#,
        MINIMAL, interval, burst
      );

      let config: Config = toml::from_str(&toml).expect("Failed to parse config");
      assert!(
        matches!(config.validate(), Err(ConfigError::Message(_))),
        "interval {} burst {}",
        interval,
        burst
      );
    }

    let config: Config = toml::from_str(MINIMAL).expect("Failed to parse config");
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_auth_config_debug_hides_secret() {
    let config: Config = toml::from_str(MINIMAL).expect("Failed to parse config");
    let debug = format!("{:?}", config.auth);

    assert!(!debug.contains("sk_test_secret"));
    assert!(debug.contains("[REDACTED]"));
  }
}
