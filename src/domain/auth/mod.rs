pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

// Re-export commonly used types
pub use entities::{Identity, ReminderPreferences, User, VerifiedToken};
pub use errors::{AuthError, RepositoryError};
pub use ports::{IdentityDirectory, TokenVerifier, UserRepository};
pub use services::AuthService;
