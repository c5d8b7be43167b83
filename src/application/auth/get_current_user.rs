use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Profile of a user as exposed by the API
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
  /// Unique identifier of the user
  pub id: Uuid,
  /// Subject assigned by the identity provider
  pub external_id: String,
  /// User's email address
  pub email: String,
  /// Whether daily reminders are enabled
  pub reminder_enabled: bool,
  /// Reminder time of day as `HH:MM`
  pub reminder_time: String,
  /// Timestamp when the user was first seen
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfileResponse {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      external_id: user.external_id,
      email: user.email,
      reminder_enabled: user.reminder_enabled,
      reminder_time: user.reminder_time.format("%H:%M").to_string(),
      created_at: user.created_at,
      updated_at: user.updated_at,
    }
  }
}

/// Use case for getting the current authenticated user
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  /// Creates a new instance of GetCurrentUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the get current user use case
  ///
  /// Reloads the user so the response reflects the stored preferences.
  ///
  /// # Errors
  /// Returns `AuthError::UserNotFound` if the user no longer exists
  pub async fn execute(&self, user_id: Uuid) -> Result<UserProfileResponse, AuthError> {
    let user = self.auth_service.get_user(user_id).await?;
    Ok(user.into())
  }
}
