use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Use case for resolving a bearer token into the calling user
pub struct AuthenticateUserUseCase {
  auth_service: Arc<AuthService>,
}

impl AuthenticateUserUseCase {
  /// Creates a new instance of AuthenticateUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the authentication use case
  ///
  /// # Arguments
  /// * `bearer_token` - The raw token taken from the `Authorization` header
  ///
  /// # Returns
  /// The local `User` linked to the token's subject, created on first sight
  ///
  /// # Errors
  /// Returns `AuthError` if the token is missing, malformed, expired or not
  /// signed by the identity provider, or if the provider cannot be reached
  pub async fn execute(&self, bearer_token: &str) -> Result<User, AuthError> {
    let user = self.auth_service.authenticate(bearer_token).await?;

    tracing::debug!(user_id = %user.id, external_id = %user.external_id, "Request authenticated");
    Ok(user)
  }
}
