//! Authentication use cases
//!
//! Callers are authenticated by the identity provider; these use cases link
//! them to local users and manage their preferences.

mod authenticate_user;
mod get_current_user;
mod update_preferences;

pub use authenticate_user::AuthenticateUserUseCase;
pub use get_current_user::{GetCurrentUserUseCase, UserProfileResponse};
pub use update_preferences::{UpdatePreferencesCommand, UpdatePreferencesUseCase};
