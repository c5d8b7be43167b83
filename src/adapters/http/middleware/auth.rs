use actix_web::{
  Error, HttpMessage, ResponseError,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  http::{Method, header},
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  application::auth::AuthenticateUserUseCase,
};

/// Authentication middleware that verifies bearer tokens and attaches the user to the request
///
/// This middleware:
/// 1. Lets `OPTIONS` requests through untouched (CORS preflight)
/// 2. Extracts the bearer token from the Authorization header
/// 3. Resolves it to a local user using AuthenticateUserUseCase
/// 4. Attaches the User entity to request extensions for downstream handlers
/// 5. Returns 401 Unauthorized if any of that fails
///
/// # Example
///
/// ```no_run
/// use actix_web::{App, web};
/// use std::sync::Arc;
/// # use expense_tracker::application::auth::AuthenticateUserUseCase;
/// # use expense_tracker::adapters::http::middleware::auth::AuthMiddleware;
///
/// # async fn example(authenticate_use_case: Arc<AuthenticateUserUseCase>) {
/// let app = App::new().service(
///   web::scope("/protected")
///     .wrap(AuthMiddleware::new(authenticate_use_case))
///     .route("", web::get().to(|| async { "Protected endpoint" })),
/// );
/// # }
/// ```
pub struct AuthMiddleware {
  authenticate_use_case: Arc<AuthenticateUserUseCase>,
}

impl AuthMiddleware {
  /// Creates a new authentication middleware
  pub fn new(authenticate_use_case: Arc<AuthenticateUserUseCase>) -> Self {
    Self {
      authenticate_use_case,
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      authenticate_use_case: self.authenticate_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  authenticate_use_case: Arc<AuthenticateUserUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let authenticate_use_case = self.authenticate_use_case.clone();

    Box::pin(async move {
      if req.method() == Method::OPTIONS {
        let res = service.call(req).await?;
        return Ok(res.map_into_left_body());
      }

      let token = match extract_bearer_token(&req) {
        Ok(token) => token,
        Err(e) => {
          tracing::debug!(path = %req.path(), "Request without bearer token");
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      let user = match authenticate_use_case.execute(&token).await {
        Ok(user) => user,
        Err(e) => {
          if e.is_upstream_failure() {
            tracing::error!(path = %req.path(), "Authentication failed: {}", e);
          } else {
            tracing::warn!(path = %req.path(), "Authentication rejected: {}", e);
          }
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      // Attach user to request extensions
      req.extensions_mut().insert(user);

      // Call the next service
      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the bearer token from the Authorization header
///
/// The scheme is matched case-insensitively.
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get(header::AUTHORIZATION)
    .and_then(|h| h.to_str().ok())
    .and_then(|value| value.split_once(' '))
    .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
    .map(|(_, token)| token.trim().to_string())
    .filter(|token| !token.is_empty())
    .ok_or(ApiError::Auth(AuthErrorKind::MissingToken))
}
