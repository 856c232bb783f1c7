use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use super::AiSourceService;
use crate::models::{
    ApiResponse,
    ai_sources::{
        requests::AiSourceFilter,
        responses::{AiSourceDetail, AiSourceListResponse},
    },
    users::entities::UserRole,
};
use crate::services::{current_user, internal_error};

pub async fn list_sources(
    service: &AiSourceService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request);

    let filter = match user.role {
        UserRole::Admin => AiSourceFilter::default(),
        UserRole::Teacher => AiSourceFilter {
            uploaded_by: Some(user.id.clone()),
            ..Default::default()
        },
        UserRole::Student => AiSourceFilter {
            active_only: true,
            ..Default::default()
        },
    };

    let sources = match storage.list_ai_sources(filter).await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list AI sources", e)),
    };

    let mut uploader_ids: Vec<String> = sources
        .iter()
        .map(|s| s.uploaded_by_user_id.clone())
        .collect();
    uploader_ids.sort();
    uploader_ids.dedup();

    let uploaders = match storage.get_users_by_ids(&uploader_ids).await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to load uploaders", e)),
    };
    let subjects = match storage.list_subjects().await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list subjects", e)),
    };
    let grades = match storage.list_grades().await {
        Ok(list) => list,
        Err(e) => return Ok(internal_error("Failed to list grades", e)),
    };

    let uploader_names: HashMap<_, _> = uploaders
        .into_iter()
        .map(|u| (u.id.clone(), u.full_name()))
        .collect();
    let subject_names: HashMap<_, _> = subjects.into_iter().map(|s| (s.id, s.name)).collect();
    let grade_names: HashMap<_, _> = grades.into_iter().map(|g| (g.id, g.name)).collect();

    let items = sources
        .into_iter()
        .map(|source| AiSourceDetail {
            uploaded_by_name: uploader_names.get(&source.uploaded_by_user_id).cloned(),
            subject_name: source
                .subject_id
                .as_ref()
                .and_then(|id| subject_names.get(id))
                .cloned(),
            grade_name: source
                .grade_id
                .as_ref()
                .and_then(|id| grade_names.get(id))
                .cloned(),
            source,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(AiSourceListResponse { items }, "OK")))
}
