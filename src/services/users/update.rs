use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::requests::{UpdateUserRequest, UserUpdate},
};
use crate::services::internal_error;
use crate::utils::clearable;

pub async fn update_user(
    service: &UserService,
    user_id: String,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let grade_id = clearable(update_data.grade_id);
    let class_id = clearable(update_data.class_id);

    if let Some(Some(ref grade_id)) = grade_id {
        match storage.get_grade_by_id(grade_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::GradeNotFound,
                    "Ročník nebol nájdený",
                )));
            }
            Err(e) => return Ok(internal_error("Failed to load grade", e)),
        }
    }
    if let Some(Some(ref class_id)) = class_id {
        match storage.get_class_by_id(class_id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::ClassNotFound,
                    "Trieda nebola nájdená",
                )));
            }
            Err(e) => return Ok(internal_error("Failed to load class", e)),
        }
    }

    let update = UserUpdate {
        first_name: update_data.first_name.map(|s| s.trim().to_string()),
        last_name: update_data.last_name.map(|s| s.trim().to_string()),
        grade_id,
        class_id,
        is_active: update_data.is_active,
        is_approved: None,
    };

    match storage.update_user(&user_id, update).await {
        Ok(Some(user)) => {
            RequireJWT::invalidate_cached_user(request, &user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Používateľ bol aktualizovaný")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Používateľ nebol nájdený",
        ))),
        Err(e) => Ok(internal_error("Failed to update user", e)),
    }
}
