pub mod ai_sources;
pub mod attachments;
pub mod auth;
pub mod chats;
pub mod classes;
pub mod grades;
pub mod registrations;
pub mod statistics;
pub mod study;
pub mod subjects;
pub mod system;
pub mod teacher_subjects;
pub mod users;

pub use ai_sources::AiSourceService;
pub use attachments::AttachmentService;
pub use auth::AuthService;
pub use chats::ChatService;
pub use classes::ClassService;
pub use grades::GradeService;
pub use registrations::RegistrationService;
pub use statistics::StatisticsService;
pub use study::StudyService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teacher_subjects::TeacherSubjectService;
pub use users::UserService;

use actix_web::{HttpRequest, HttpResponse};
use std::fmt::Display;
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};
use crate::storage::Storage;
use crate::utils::upload::UploadError;

/// 从 app data 中取存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> Arc<dyn Storage> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .expect("Storage not found in app data")
        .get_ref()
        .clone()
}

/// 记录错误并返回 500
pub(crate) fn internal_error(context: &str, err: impl Display) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        "Interná chyba servera",
    ))
}

/// 当前登录用户，缺失时返回 401 响应
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Neplatný token",
        ))
    })
}

/// 上传失败时的响应
pub(crate) fn upload_error_response(err: UploadError) -> HttpResponse {
    match err {
        UploadError::MissingFile => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileMissing,
            "Chýba súbor",
        )),
        UploadError::MultipleFiles => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::MultifileUploadNotAllowed,
            "Naraz je možné nahrať len jeden súbor",
        )),
        UploadError::TooLarge => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileSizeExceeded,
            "Súbor je príliš veľký",
        )),
        UploadError::Io(e) => {
            tracing::error!("File upload failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                "Chyba pri nahrávaní súboru",
            ))
        }
    }
}
