use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AuthService, normalize_email};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::requests::RegisterRequest,
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::services::internal_error;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = normalize_email(&register_request.email);

    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserEmailInvalid,
            msg,
        )));
    }
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            msg,
        )));
    }

    let storage = service.get_storage(request);

    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::UserEmailAlreadyExists,
                "Používateľ s touto emailovou adresou už existuje",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(internal_error("Registration lookup failed", e)),
    }

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(internal_error("Password hashing failed", e)),
    };

    let role = UserRole::from_registration(register_request.role.as_deref());
    let new_user = CreateUserRequest {
        email,
        password_hash,
        first_name: register_request.first_name.trim().to_string(),
        last_name: register_request.last_name.trim().to_string(),
        role,
        is_approved: false,
        is_active: false,
    };

    match storage.register_user(new_user).await {
        Ok((user, _)) => {
            info!("Registration submitted for {} as {}", user.email, user.role);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Registrácia bola odoslaná. Čakáte na schválenie administrátorom.",
            )))
        }
        Err(e) => Ok(internal_error("Registration failed", e)),
    }
}
