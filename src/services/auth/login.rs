use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AuthService, normalize_email};
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::services::internal_error;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Nesprávne prihlasovacie údaje";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let email = normalize_email(&login_request.email);

    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                INVALID_CREDENTIALS,
            )));
        }
        Err(e) => return Ok(internal_error("Login lookup failed", e)),
    };

    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            INVALID_CREDENTIALS,
        )));
    }

    if !user.is_approved {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountNotApproved,
            "Váš účet ešte nebol schválený administrátorom",
        )));
    }
    if !user.is_active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountDisabled,
            "Váš účet bol deaktivovaný",
        )));
    }

    match JwtUtils::generate_token(&user) {
        Ok(token) => {
            tracing::info!("User {} logged in successfully", user.email);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                LoginResponse { token, user },
                "Prihlásenie úspešné",
            )))
        }
        Err(e) => Ok(internal_error("Failed to generate JWT token", e)),
    }
}
