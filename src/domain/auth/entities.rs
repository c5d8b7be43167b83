use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Local account linked to an identity-provider subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// Subject (`sub`) assigned by the identity provider (unique)
  pub external_id: String,
  /// Primary email address as reported by the identity provider
  pub email: String,
  /// Whether the user wants a daily expense reminder
  pub reminder_enabled: bool,
  /// Local time of day at which the reminder is due
  pub reminder_time: NaiveTime,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user for a freshly seen identity
  pub fn new(identity: Identity) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      external_id: identity.external_id,
      email: identity.email,
      reminder_enabled: false,
      reminder_time: default_reminder_time(),
      created_at: now,
      updated_at: now,
    }
  }

  /// Applies the provided preference changes, leaving omitted ones untouched
  pub fn update_preferences(&mut self, preferences: ReminderPreferences) {
    if let Some(enabled) = preferences.enabled {
      self.reminder_enabled = enabled;
    }
    if let Some(time) = preferences.time {
      self.reminder_time = time;
    }
    self.updated_at = Utc::now();
  }
}

/// Reminders go out at 20:00 unless the user picks another time
pub fn default_reminder_time() -> NaiveTime {
  NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Identity confirmed by the provider: who the caller is and how to reach them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
  pub external_id: String,
  pub email: String,
}

/// Claims of a bearer token whose signature and issuer have been verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
  pub subject: String,
  pub issuer: String,
  pub expires_at: i64,
  pub authorized_party: Option<String>,
}

/// Partial update of a user's reminder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderPreferences {
  pub enabled: Option<bool>,
  pub time: Option<NaiveTime>,
}

impl ReminderPreferences {
  pub fn is_empty(&self) -> bool {
    self.enabled.is_none() && self.time.is_none()
  }
}
