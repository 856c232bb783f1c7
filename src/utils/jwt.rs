use crate::config::AppConfig;
use crate::models::users::entities::User;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // 用户 ID
    pub email: String, // 用户邮箱
    pub role: String,  // 用户角色
    pub iat: usize,    // 签发时间
    pub exp: usize,    // 过期时间
}

/// Token 校验失败原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// 为用户签发访问令牌
    pub fn generate_token(user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::generate_token_with_expiry(
            &user.id,
            &user.email,
            &user.role.to_string(),
            chrono::Duration::hours(config.jwt.token_expiry_hours),
        )
    }

    // 生成带自定义过期时间的 Token
    pub fn generate_token_with_expiry(
        user_id: &str,
        email: &str,
        role: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now.timestamp().max(0) as usize,
            exp: expiration.timestamp().max(0) as usize,
        };

        let secret = Self::get_secret();
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    /// 验证 JWT，区分过期与其他错误
    pub fn verify_token(token: &str) -> Result<Claims, TokenError> {
        let secret = Self::get_secret();
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<Claims>(token, &decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_verify() {
        let token = JwtUtils::generate_token_with_expiry(
            "user-1",
            "jan@skola.sk",
            "student",
            chrono::Duration::hours(1),
        )
        .unwrap();
        let claims = JwtUtils::verify_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "jan@skola.sk");
        assert_eq!(claims.role, "student");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token() {
        let token = JwtUtils::generate_token_with_expiry(
            "user-1",
            "jan@skola.sk",
            "student",
            chrono::Duration::hours(-2),
        )
        .unwrap();
        assert_eq!(JwtUtils::verify_token(&token).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_token() {
        assert_eq!(
            JwtUtils::verify_token("not.a.token").unwrap_err(),
            TokenError::Invalid
        );
    }
}
