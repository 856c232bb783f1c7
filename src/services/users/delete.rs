use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::UserService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::internal_error;

pub async fn delete_user(
    service: &UserService,
    user_id: String,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_id(request).as_deref() == Some(user_id.as_str()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentUser,
            "Nemôžete zmazať svoj vlastný účet",
        )));
    }

    let storage = service.get_storage(request);

    match storage.delete_user_cascade(&user_id).await {
        Ok(Some(file_paths)) => {
            for path in &file_paths {
                if let Err(e) = tokio::fs::remove_file(path).await {
                    warn!("Failed to remove file {} of deleted user: {}", path, e);
                }
            }
            RequireJWT::invalidate_cached_user(request, &user_id).await;
            info!("User {} deleted with {} files", user_id, file_paths.len());
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Používateľ bol zmazaný")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "Používateľ nebol nájdený",
        ))),
        Err(e) => Ok(internal_error("Failed to delete user", e)),
    }
}
