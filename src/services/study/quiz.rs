use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::{StudyService, generation_failed, resolve_subject_name, validate_generation};
use crate::llm::study::{build_quiz_prompt, build_study_system_prompt, parse_quiz};
use crate::models::{
    ApiResponse,
    study::{requests::GenerateQuizRequest, responses::QuizResponse},
};
use crate::services::current_user;

pub async fn generate_quiz(
    service: &StudyService,
    request_data: GenerateQuizRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let topic = match validate_generation(&request_data.topic, request_data.question_count) {
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
    let prompt = build_quiz_prompt(&topic, request_data.question_count);

    let reply = match llm.complete(&system_prompt, &[], &prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Quiz generation via {} failed: {}", llm.name(), e);
            return Ok(generation_failed("Nepodarilo sa vytvoriť kvíz"));
        }
    };

    let questions = match parse_quiz(&reply, request_data.question_count) {
        Ok(questions) if !questions.is_empty() => questions,
        Ok(_) => {
            warn!("Model {} returned no usable quiz questions", llm.name());
            return Ok(generation_failed("Nepodarilo sa vytvoriť kvíz"));
        }
        Err(e) => {
            warn!("Unusable quiz reply from {}: {}", llm.name(), e);
            return Ok(generation_failed("Nepodarilo sa vytvoriť kvíz"));
        }
    };

    info!(
        "User {} generated {} quiz questions on \"{}\"",
        user.id,
        questions.len(),
        topic
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        QuizResponse { topic, questions },
        "OK",
    )))
}
