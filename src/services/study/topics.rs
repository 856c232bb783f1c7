use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use std::path::Path;

use super::StudyService;
use crate::models::{
    ApiResponse,
    ai_sources::requests::AiSourceFilter,
    study::{entities::StudyTopic, responses::TopicsResponse},
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};

pub async fn list_topics(service: &StudyService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    // 与对话提示词使用相同的可见范围
    let filter = AiSourceFilter {
        active_only: true,
        grade_or_unassigned: match user.role {
            UserRole::Student => user.grade_id.clone(),
            _ => None,
        },
        ..Default::default()
    };
    let sources = match storage.list_ai_sources(filter).await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list AI sources", e)),
    };
    let subjects = match storage.list_subjects().await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list subjects", e)),
    };

    let subject_names: HashMap<String, String> = subjects
        .iter()
        .map(|s| (s.id.clone(), s.name.clone()))
        .collect();

    let topics: Vec<StudyTopic> = sources
        .into_iter()
        .map(|source| StudyTopic {
            name: topic_name(&source.file_name),
            subject_name: source
                .subject_id
                .as_deref()
                .and_then(|id| subject_names.get(id))
                .cloned(),
            id: source.id,
            description: source.description.filter(|d| !d.is_empty()),
            subject_id: source.subject_id,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TopicsResponse { topics, subjects },
        "OK",
    )))
}

/// 去掉扩展名的文件名
fn topic_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or(file_name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_name_strips_extension() {
        assert_eq!(topic_name("Derivácie.pdf"), "Derivácie");
        assert_eq!(topic_name("vzorce.tar.gz"), "vzorce.tar");
        assert_eq!(topic_name("poznamky"), "poznamky");
    }
}
