use std::sync::Arc;
use uuid::Uuid;

use super::entities::{ReminderPreferences, User};
use super::errors::AuthError;
use super::ports::{IdentityDirectory, TokenVerifier, UserRepository};

/// Authentication service resolving bearer tokens into local users
pub struct AuthService {
  token_verifier: Arc<dyn TokenVerifier>,
  identity_directory: Arc<dyn IdentityDirectory>,
  user_repo: Arc<dyn UserRepository>,
}

impl AuthService {
  pub fn new(
    token_verifier: Arc<dyn TokenVerifier>,
    identity_directory: Arc<dyn IdentityDirectory>,
    user_repo: Arc<dyn UserRepository>,
  ) -> Self {
    Self {
      token_verifier,
      identity_directory,
      user_repo,
    }
  }

  /// Resolves a bearer token into the local user it belongs to
  ///
  /// Verifies the token, fetches the caller's profile from the identity
  /// provider and links it to a local user, creating one on first sight.
  pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
    if token.trim().is_empty() {
      return Err(AuthError::MissingToken);
    }

    let verified = self.token_verifier.verify(token).await?;
    let identity = self.identity_directory.lookup(&verified.subject).await?;

    if identity.external_id != verified.subject {
      return Err(AuthError::IncompleteProfile(format!(
        "profile subject '{}' does not match token subject",
        identity.external_id
      )));
    }

    self.user_repo.upsert_identity(&identity).await
  }

  pub async fn get_user(&self, user_id: Uuid) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  pub async fn update_preferences(
    &self,
    user_id: Uuid,
    preferences: ReminderPreferences,
  ) -> Result<User, AuthError> {
    let mut user = self.get_user(user_id).await?;

    if preferences.is_empty() {
      return Ok(user);
    }

    user.update_preferences(preferences);
    let updated = self.user_repo.update(user).await?;

    tracing::debug!(
      user_id = %updated.id,
      reminder_enabled = updated.reminder_enabled,
      "User preferences updated"
    );
    Ok(updated)
  }
}
