use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{Identity, User, VerifiedToken};
use super::errors::AuthError;

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Returns the user linked to the identity, creating it on first sight.
  /// The stored email is refreshed from the identity on every call.
  async fn upsert_identity(&self, identity: &Identity) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  /// Persists changes to an existing user
  async fn update(&self, user: User) -> Result<User, AuthError>;
}

/// Verifies the signature and standard claims of a bearer token
#[async_trait]
pub trait TokenVerifier: Send + Sync {
  async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError>;
}

/// Looks up profile data for a verified subject at the identity provider
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
  async fn lookup(&self, subject: &str) -> Result<Identity, AuthError>;
}
