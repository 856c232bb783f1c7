pub mod admin;

pub mod ai_sources;

pub mod attachments;

pub mod auth;

pub mod chats;

pub mod study;

pub mod system;

pub mod taxonomy;

pub mod teacher;

pub use admin::configure_admin_routes;
pub use ai_sources::configure_ai_source_routes;
pub use attachments::configure_attachment_routes;
pub use auth::configure_auth_routes;
pub use chats::configure_chat_routes;
pub use study::configure_study_routes;
pub use system::configure_system_routes;
pub use taxonomy::configure_taxonomy_routes;
pub use teacher::configure_teacher_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_admin_routes)
        .configure(configure_taxonomy_routes)
        .configure(configure_teacher_routes)
        .configure(configure_ai_source_routes)
        .configure(configure_chat_routes)
        .configure(configure_attachment_routes)
        .configure(configure_study_routes)
        .configure(configure_system_routes);
}
