use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::study::requests::{GenerateFlashcardsRequest, GenerateQuizRequest};
use crate::services::StudyService;

// 懒加载的全局 StudyService 实例
static STUDY_SERVICE: Lazy<StudyService> = Lazy::new(StudyService::new_lazy);

pub async fn list_topics(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDY_SERVICE.list_topics(&req).await
}

pub async fn generate_flashcards(
    req: HttpRequest,
    request_data: web::Json<GenerateFlashcardsRequest>,
) -> ActixResult<HttpResponse> {
    STUDY_SERVICE
        .generate_flashcards(request_data.into_inner(), &req)
        .await
}

pub async fn generate_quiz(
    req: HttpRequest,
    request_data: web::Json<GenerateQuizRequest>,
) -> ActixResult<HttpResponse> {
    STUDY_SERVICE
        .generate_quiz(request_data.into_inner(), &req)
        .await
}

// 配置路由，所有角色可用
pub fn configure_study_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/topics")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(list_topics)),
    )
    .service(
        web::scope("/api/flashcards")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/generate")
                    .wrap(middlewares::RateLimit::study_generate())
                    .route(web::post().to(generate_flashcards)),
            ),
    )
    .service(
        web::scope("/api/quiz")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/generate")
                    .wrap(middlewares::RateLimit::study_generate())
                    .route(web::post().to(generate_quiz)),
            ),
    );
}
