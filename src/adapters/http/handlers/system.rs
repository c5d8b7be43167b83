use actix_web::HttpResponse;

use crate::adapters::http::dtos::MessageResponse;

/// GET /
pub async fn root_handler() -> HttpResponse {
  HttpResponse::Ok().json(MessageResponse {
    message: "Expense Tracker API is running".to_string(),
  })
}

/// GET /health
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().body("OK")
}
