use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::requests::UserUpdate};
use crate::services::internal_error;

pub async fn set_active(
    service: &UserService,
    user_id: String,
    is_active: bool,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let update = UserUpdate {
        is_active: Some(is_active),
        ..Default::default()
    };

    match storage.update_user(&user_id, update).await {
        Ok(Some(_)) => {
            RequireJWT::invalidate_cached_user(request, &user_id).await;
            let message = if is_active {
                "Účet bol aktivovaný"
            } else {
                "Účet bol deaktivovaný"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Používateľ nebol nájdený",
        ))),
        Err(e) => Ok(internal_error("Failed to change account status", e)),
    }
}
