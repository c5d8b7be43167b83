pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{ErrorResponse, MessageResponse, SuccessResponse};
pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{
  AuthMiddleware, RequestId, RequestIdExt, RequestIdMiddleware, cors_policy,
};
pub use routes::{ApiDependencies, configure_api_routes};
