pub mod flashcards;
pub mod quiz;
pub mod topics;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::llm::LlmClient;
use crate::models::{
    ApiResponse, ErrorCode,
    study::requests::{GenerateFlashcardsRequest, GenerateQuizRequest, MAX_GENERATED_ITEMS},
};
use crate::services::internal_error;
use crate::storage::Storage;

pub struct StudyService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudyService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        match &self.storage {
            Some(storage) => storage.clone(),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_llm(&self, request: &HttpRequest) -> Arc<dyn LlmClient> {
        request
            .app_data::<web::Data<Arc<dyn LlmClient>>>()
            .expect("LLM client not found in app data")
            .get_ref()
            .clone()
    }

    pub async fn list_topics(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        topics::list_topics(self, request).await
    }

    pub async fn generate_flashcards(
        &self,
        request_data: GenerateFlashcardsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        flashcards::generate_flashcards(self, request_data, request).await
    }

    pub async fn generate_quiz(
        &self,
        request_data: GenerateQuizRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        quiz::generate_quiz(self, request_data, request).await
    }
}

/// 校验主题与数量，返回去除空白后的主题
pub(crate) fn validate_generation(topic: &str, count: u32) -> Result<String, HttpResponse> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudyTopicEmpty,
            "Zadajte tému",
        )));
    }
    if count == 0 || count > MAX_GENERATED_ITEMS {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudyCountInvalid,
            format!("Počet musí byť od 1 do {MAX_GENERATED_ITEMS}"),
        )));
    }
    Ok(topic.to_string())
}

/// 查找可选科目的名称，空字符串视为未指定
pub(crate) async fn resolve_subject_name(
    storage: &Arc<dyn Storage>,
    subject_id: Option<&str>,
) -> Result<Option<String>, HttpResponse> {
    let Some(subject_id) = subject_id.filter(|id| !id.is_empty()) else {
        return Ok(None);
    };
    match storage.get_subject_by_id(subject_id).await {
        Ok(Some(subject)) => Ok(Some(subject.name)),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectNotFound,
            "Predmet nebol nájdený",
        ))),
        Err(e) => Err(internal_error("Failed to load subject", e)),
    }
}

/// 模型不可用或输出无法使用
pub(crate) fn generation_failed(message: &str) -> HttpResponse {
    HttpResponse::BadGateway().json(ApiResponse::error_empty(
        ErrorCode::StudyGenerationFailed,
        message,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_generation() {
        assert_eq!(validate_generation("  Fotosyntéza ", 3).unwrap(), "Fotosyntéza");
        assert_eq!(
            validate_generation("   ", 3).unwrap_err().status(),
            actix_web::http::StatusCode::BAD_REQUEST
        );
        assert!(validate_generation("Téma", 0).is_err());
        assert!(validate_generation("Téma", MAX_GENERATED_ITEMS).is_ok());
        assert!(validate_generation("Téma", MAX_GENERATED_ITEMS + 1).is_err());
    }
}
