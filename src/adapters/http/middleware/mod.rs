pub mod auth;
pub mod cors;
pub mod request_id;

// Re-export middleware components for easier access
pub use auth::AuthMiddleware;
pub use cors::cors_policy;
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
