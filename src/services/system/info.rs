use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::models::{
    ApiResponse,
    system::{entities::AppStartTime, responses::ApiInfoResponse},
};

pub async fn get_api_info(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (chrono::Utc::now() - start.start_datetime).num_seconds())
        .unwrap_or(0);

    let response = ApiInfoResponse {
        message: "PocketBuddy API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "OK")))
}
