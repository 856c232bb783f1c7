/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <token>`，并把当前用户放入请求扩展。
 *
 * ```rust,ignore
 * web::scope("/api/chats")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_chats))
 * ```
 *
 * 处理程序中通过 `RequireJWT::extract_user(&req)` 取得用户。
 *
 * ## 认证流程
 *
 * 1. 令牌缺失或签名无效返回 401 `Neplatný token`
 * 2. 令牌过期返回 401 `Token vypršal`
 * 3. 用户不存在返回 401，用户被停用返回 403
 * 4. 用户按 ID 缓存在 `user:{id}`，用户变更时由服务层失效
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::ErrorCode;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::jwt::{JwtUtils, TokenError};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

/// 认证失败的原因
enum AuthFailure {
    Unauthorized(ErrorCode, &'static str),
    Forbidden(&'static str),
    Internal(String),
}

impl AuthFailure {
    fn into_response(self) -> HttpResponse {
        match self {
            AuthFailure::Unauthorized(code, message) => {
                create_error_response(StatusCode::UNAUTHORIZED, code, message)
            }
            AuthFailure::Forbidden(message) => {
                create_error_response(StatusCode::FORBIDDEN, ErrorCode::AccountDisabled, message)
            }
            AuthFailure::Internal(err) => {
                error!("JWT authentication internal error: {}", err);
                create_error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalServerError,
                    "Interná chyba servera",
                )
            }
        }
    }
}

/// 用户缓存键
pub fn user_cache_key(user_id: &str) -> String {
    format!("user:{user_id}")
}

// 提取并验证 JWT，返回当前用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User, AuthFailure> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthFailure::Unauthorized(
            ErrorCode::TokenInvalid,
            "Neplatný token",
        ))?;

    let claims = JwtUtils::verify_token(token).map_err(|err| {
        info!("JWT token validation failed: {:?}", err);
        match err {
            TokenError::Expired => {
                AuthFailure::Unauthorized(ErrorCode::TokenExpired, "Token vypršal")
            }
            TokenError::Invalid => {
                AuthFailure::Unauthorized(ErrorCode::TokenInvalid, "Neplatný token")
            }
        }
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Cache not found in app data".to_string()))?;
    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|s| s.get_ref().clone())
        .ok_or_else(|| AuthFailure::Internal("Storage not found in app data".to_string()))?;

    let cache_key = user_cache_key(&claims.sub);
    let cached = match cache.get::<User>(&cache_key).await {
        CacheResult::Found(user) => Some(user),
        _ => None,
    };

    let user = match cached {
        Some(user) => user,
        None => {
            let user = storage
                .get_user_by_id(&claims.sub)
                .await
                .map_err(|e| AuthFailure::Internal(e.to_string()))?
                .ok_or(AuthFailure::Unauthorized(
                    ErrorCode::UserNotFound,
                    "Používateľ nebol nájdený",
                ))?;

            cache
                .insert(cache_key, &user, AppConfig::get().cache.default_ttl)
                .await;
            user
        }
    };

    if !user.is_active {
        return Err(AuthFailure::Forbidden("Váš účet bol deaktivovaný"));
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    HttpResponse::NoContent().finish().map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(failure) => {
                    info!("JWT authentication failed for request to {}", req.path());
                    Ok(req.into_response(failure.into_response().map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 当前用户，仅在应用了 RequireJWT 的路由中可用
    pub fn extract_user(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<String> {
        req.extensions().get::<User>().map(|user| user.id.clone())
    }

    pub fn extract_user_role(req: &HttpRequest) -> Option<UserRole> {
        req.extensions().get::<User>().map(|user| user.role)
    }

    /// 用户信息变更后使缓存失效
    pub async fn invalidate_cached_user(req: &HttpRequest, user_id: &str) {
        if let Some(cache) = req.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
            cache.remove(&user_cache_key(user_id)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_cache_key() {
        assert_eq!(user_cache_key("abc"), "user:abc");
    }
}
