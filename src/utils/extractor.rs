use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 路径参数 `{id}`，必须是合法的 UUID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeId(pub String);

impl SafeId {
    pub fn into_inner(self) -> String {
        self.0
    }

    fn parse(raw: Option<&str>) -> Result<Self, actix_web::Error> {
        match raw.map(uuid::Uuid::parse_str) {
            Some(Ok(id)) => Ok(SafeId(id.to_string())),
            _ => {
                let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::BadRequest,
                    "Neplatný identifikátor",
                ));
                Err(InternalError::from_response("invalid id", response).into())
            }
        }
    }
}

impl std::ops::Deref for SafeId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for SafeId {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::parse(req.match_info().get("id")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uuid() {
        let id = "6f1c2b1e-8d4a-4e0f-9a43-0b8c1d2e3f40";
        assert_eq!(SafeId::parse(Some(id)).unwrap().into_inner(), id);
    }

    #[test]
    fn test_normalizes_case() {
        let id = SafeId::parse(Some("6F1C2B1E-8D4A-4E0F-9A43-0B8C1D2E3F40")).unwrap();
        assert_eq!(&*id, "6f1c2b1e-8d4a-4e0f-9a43-0b8c1d2e3f40");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(SafeId::parse(Some("1; DROP TABLE users")).is_err());
        assert!(SafeId::parse(None).is_err());
    }
}
