use actix_cors::Cors;
use actix_web::http::{
  Method,
  header::{self, HeaderName},
};

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Cross-origin policy for browser clients
///
/// Allowed origins are echoed back with credentials allowed, never sent as a
/// wildcard; `"*"` in the allow-list accepts any origin. Preflight requests are
/// answered by the policy itself and never reach the auth middleware.
pub fn cors_policy<S: AsRef<str>>(allowed_origins: &[S]) -> Cors {
  let mut cors = Cors::default()
    .allowed_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS,
    ])
    .allowed_headers([
      header::AUTHORIZATION,
      header::CONTENT_TYPE,
      header::ACCEPT,
      REQUEST_ID_HEADER,
    ])
    .expose_headers([header::CONTENT_DISPOSITION, REQUEST_ID_HEADER])
    .supports_credentials()
    .max_age(3600);

  for origin in allowed_origins {
    let origin = origin.as_ref().trim_end_matches('/');
    cors = if origin == "*" {
      cors.allow_any_origin()
    } else {
      cors.allowed_origin(origin)
    };
  }

  cors
}
