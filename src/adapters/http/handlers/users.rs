use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use super::get_user;
use crate::adapters::http::{dtos::UpdatePreferencesRequest, errors::ApiError};
use crate::application::auth::{
  GetCurrentUserUseCase, UpdatePreferencesCommand, UpdatePreferencesUseCase,
};

/// Handler for getting the current user's profile
///
/// GET /user/me
/// Response: UserProfileResponse (JSON)
pub async fn get_current_user_handler(
  req: HttpRequest,
  use_case: web::Data<Arc<GetCurrentUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  let response = use_case.execute(user.id).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Handler for updating reminder preferences
///
/// PUT /user/preferences
/// Body: UpdatePreferencesRequest (JSON)
/// Response: UserProfileResponse (JSON)
pub async fn update_preferences_handler(
  req: HttpRequest,
  request: web::Json<UpdatePreferencesRequest>,
  use_case: web::Data<Arc<UpdatePreferencesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;
  request.validate()?;

  let request = request.into_inner();
  let command = UpdatePreferencesCommand {
    user_id: user.id,
    reminder_enabled: request.reminder_enabled,
    reminder_time: request.reminder_time,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}
