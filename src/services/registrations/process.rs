use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::RegistrationService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, registrations::entities::ProcessOutcome};
use crate::services::{current_user, internal_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

pub async fn process_registration(
    service: &RegistrationService,
    request_id: String,
    decision: Decision,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let admin = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let outcome = match decision {
        Decision::Approve => storage.approve_registration(&request_id, &admin.id).await,
        Decision::Reject => storage.reject_registration(&request_id, &admin.id).await,
    };

    match outcome {
        Ok(ProcessOutcome::Processed(registration)) => {
            info!(
                "Registration {} processed as {} by {}",
                registration.id, registration.status, admin.email
            );
            RequireJWT::invalidate_cached_user(request, &registration.user_id).await;
            let message = match decision {
                Decision::Approve => "Registrácia bola schválená",
                Decision::Reject => "Registrácia bola zamietnutá",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(message)))
        }
        Ok(ProcessOutcome::AlreadyProcessed(status)) => {
            Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::RegistrationAlreadyProcessed,
                format!("Žiadosť už bola spracovaná ({status})"),
            )))
        }
        Ok(ProcessOutcome::NotFound) => Ok(HttpResponse::NotFound().json(
            ApiResponse::error_empty(ErrorCode::RegistrationNotFound, "Žiadosť nebola nájdená"),
        )),
        Err(e) => Ok(internal_error("Failed to process registration", e)),
    }
}
