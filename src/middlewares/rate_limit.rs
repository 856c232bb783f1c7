/*!
 * 速率限制中间件
 *
 * 按客户端 IP（已认证时按用户 ID）在固定时间窗口内计数，超出返回 429。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// 计数缓存，键为 `前缀:标识`
static RATE_LIMIT_CACHE: Lazy<Cache<String, u32>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64, key_prefix: &'static str) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix,
        }
    }

    /// 登录：10 次/分钟/IP
    pub fn login() -> Self {
        Self::new(10, 60, "login")
    }

    /// 注册：5 次/分钟/IP
    pub fn register() -> Self {
        Self::new(5, 60, "register")
    }

    /// 上传：20 次/分钟/用户
    pub fn file_upload() -> Self {
        Self::new(20, 60, "upload")
    }

    /// 对话消息：30 次/分钟/用户
    pub fn chat_message() -> Self {
        Self::new(30, 60, "chat")
    }

    /// 学习卡片与测验生成：10 次/分钟/用户
    pub fn study_generate() -> Self {
        Self::new(10, 60, "study")
    }
}

// 优先使用连接信息中的 IP，其次是代理头
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
        && ip.trim().parse::<IpAddr>().is_ok()
    {
        return ip.trim().to_string();
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn rate_limit_key(req: &ServiceRequest, prefix: &str) -> String {
    // 先释放 extensions 的借用，connection_info() 需要可变借用
    let user_id = req.extensions().get::<User>().map(|u| u.id.clone());
    match user_id {
        Some(id) => format!("{prefix}:user:{id}"),
        None => format!("{prefix}:ip:{}", extract_client_ip(req)),
    }
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header((RETRY_AFTER, retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Príliš veľa požiadaviek, skúste to neskôr",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    config: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let config = self.config.clone();

        Box::pin(async move {
            let cache_key = rate_limit_key(&req, config.key_prefix);
            let current_count = RATE_LIMIT_CACHE.get(&cache_key).await.unwrap_or(0);

            if current_count >= config.max_requests {
                warn!(
                    "Rate limit exceeded for key: {} ({}/{})",
                    cache_key, current_count, config.max_requests
                );
                return Ok(req.into_response(
                    create_rate_limit_response(config.window_secs).map_into_right_body(),
                ));
            }

            RATE_LIMIT_CACHE.insert(cache_key, current_count + 1).await;

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 10);
        assert_eq!(login.window_secs, 60);
        assert_eq!(login.key_prefix, "login");

        assert_eq!(RateLimit::register().max_requests, 5);
        assert_eq!(RateLimit::file_upload().key_prefix, "upload");
        assert_eq!(RateLimit::study_generate().max_requests, 10);
    }

    #[test]
    fn test_key_falls_back_to_peer_ip() {
        let req = actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .to_srv_request();
        assert_eq!(rate_limit_key(&req, "login"), "login:ip:10.1.2.3");
    }
}
