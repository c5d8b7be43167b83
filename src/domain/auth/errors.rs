use thiserror::Error;

/// Main authentication error type
///
/// Credential and provider failures all end up as a 401 at the HTTP boundary;
/// the distinction only matters for logging.
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Authorization header missing")]
  MissingToken,

  #[error("Malformed token: {0}")]
  MalformedToken(String),

  #[error("Token has expired")]
  TokenExpired,

  #[error("Public key not found for token (kid: {0})")]
  UnknownSigningKey(String),

  #[error("Invalid token: {0}")]
  InvalidToken(String),

  #[error("Token was issued for an unauthorized party: {0}")]
  UnauthorizedParty(String),

  #[error("Identity provider unavailable: {0}")]
  ProviderUnavailable(String),

  #[error("Identity provider profile is incomplete: {0}")]
  IncompleteProfile(String),

  #[error("User not found")]
  UserNotFound,

  #[error("Invalid preferences: {0}")]
  InvalidPreferences(String),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),
}

impl AuthError {
  /// Whether the failure lies with our side or the provider rather than with
  /// the presented credentials
  pub fn is_upstream_failure(&self) -> bool {
    matches!(
      self,
      AuthError::ProviderUnavailable(_) | AuthError::Repository(_)
    )
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::RowNotFound => RepositoryError::NotFound,
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}
