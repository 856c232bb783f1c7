use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::RegistrationService;
use crate::models::{ApiResponse, registrations::responses::RegistrationListResponse};
use crate::services::internal_error;

pub async fn list_pending(
    service: &RegistrationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_pending_registrations().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RegistrationListResponse { items },
            "OK",
        ))),
        Err(e) => Ok(internal_error("Failed to list registration requests", e)),
    }
}
