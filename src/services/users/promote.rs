use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::UserUpdate},
};
use crate::services::internal_error;

fn not_allowed(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::PromoteGradeNotAllowed,
        message,
    ))
}

pub async fn promote_grade(
    service: &UserService,
    user_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match storage.get_user_by_id(&user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "Používateľ nebol nájdený",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load user", e)),
    };

    if user.role != UserRole::Student {
        return Ok(not_allowed("Len študentov je možné preradiť"));
    }
    let Some(current_grade_id) = user.grade_id else {
        return Ok(not_allowed("Študent nemá priradený ročník"));
    };

    let current_grade = match storage.get_grade_by_id(&current_grade_id).await {
        Ok(Some(grade)) => grade,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::GradeNotFound,
                "Aktuálny ročník nebol nájdený",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to load grade", e)),
    };

    let Some(next_order) = current_grade.order.checked_add(1) else {
        return Ok(not_allowed("Študent je už v najvyššom ročníku"));
    };

    let next_grade = match storage.get_grade_by_order(next_order).await {
        Ok(Some(grade)) => grade,
        Ok(None) => return Ok(not_allowed("Študent je už v najvyššom ročníku")),
        Err(e) => return Ok(internal_error("Failed to load next grade", e)),
    };

    let update = UserUpdate {
        grade_id: Some(Some(next_grade.id.clone())),
        ..Default::default()
    };
    match storage.update_user(&user_id, update).await {
        Ok(Some(_)) => {
            RequireJWT::invalidate_cached_user(request, &user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                next_grade.clone(),
                format!("Študent bol preradený do ročníka: {}", next_grade.name),
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Používateľ nebol nájdený",
        ))),
        Err(e) => Ok(internal_error("Failed to promote student", e)),
    }
}
