use chrono::NaiveTime;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::get_current_user::UserProfileResponse;
use crate::domain::auth::entities::ReminderPreferences;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

#[derive(Debug, Deserialize)]
pub struct UpdatePreferencesCommand {
  pub user_id: Uuid,
  pub reminder_enabled: Option<bool>,
  /// Time of day as `HH:MM` (seconds are accepted and kept)
  pub reminder_time: Option<String>,
}

pub struct UpdatePreferencesUseCase {
  auth_service: Arc<AuthService>,
}

impl UpdatePreferencesUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: UpdatePreferencesCommand,
  ) -> Result<UserProfileResponse, AuthError> {
    let time = command
      .reminder_time
      .as_deref()
      .map(parse_reminder_time)
      .transpose()?;

    let preferences = ReminderPreferences {
      enabled: command.reminder_enabled,
      time,
    };

    let user = self
      .auth_service
      .update_preferences(command.user_id, preferences)
      .await?;

    Ok(user.into())
  }
}

fn parse_reminder_time(value: &str) -> Result<NaiveTime, AuthError> {
  let value = value.trim();
  NaiveTime::parse_from_str(value, "%H:%M")
    .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
    .map_err(|_| {
      AuthError::InvalidPreferences(format!("reminder_time must be HH:MM, got '{}'", value))
    })
}
