use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::{StudyService, generation_failed, resolve_subject_name, validate_generation};
use crate::llm::study::{build_flashcards_prompt, build_study_system_prompt, parse_flashcards};
use crate::models::{
    ApiResponse,
    study::{requests::GenerateFlashcardsRequest, responses::FlashcardsResponse},
};
use crate::services::current_user;

pub async fn generate_flashcards(
    service: &StudyService,
    request_data: GenerateFlashcardsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let topic = match validate_generation(&request_data.topic, request_data.count) {
        Ok(topic) => topic,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let subject_name =
        match resolve_subject_name(&storage, request_data.subject_id.as_deref()).await {
            Ok(name) => name,
            Err(response) => return Ok(response),
        };

    let llm = service.get_llm(request);
    let system_prompt = build_study_system_prompt(subject_name.as_deref());
    let prompt = build_flashcards_prompt(&topic, request_data.count);

    let reply = match llm.complete(&system_prompt, &[], &prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Flashcard generation via {} failed: {}", llm.name(), e);
            return Ok(generation_failed("Nepodarilo sa vytvoriť kartičky"));
        }
    };

    let flashcards = match parse_flashcards(&reply, request_data.count) {
        Ok(cards) if !cards.is_empty() => cards,
        Ok(_) => {
            warn!("Model {} returned no usable flashcards", llm.name());
            return Ok(generation_failed("Nepodarilo sa vytvoriť kartičky"));
        }
        Err(e) => {
            warn!("Unusable flashcard reply from {}: {}", llm.name(), e);
            return Ok(generation_failed("Nepodarilo sa vytvoriť kartičky"));
        }
    };

    info!(
        "User {} generated {} flashcards on \"{}\"",
        user.id,
        flashcards.len(),
        topic
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        FlashcardsResponse { topic, flashcards },
        "OK",
    )))
}
