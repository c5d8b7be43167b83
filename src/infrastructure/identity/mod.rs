pub mod jwks_verifier;
pub mod user_directory;

pub use jwks_verifier::JwksTokenVerifier;
pub use user_directory::ProviderUserDirectory;
