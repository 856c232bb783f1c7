pub mod ai_sources;
pub mod attachments;
pub mod auth;
pub mod chats;
pub mod classes;
pub mod common;
pub mod grades;
pub mod registrations;
pub mod statistics;
pub mod study;
pub mod subjects;
pub mod system;
pub mod teacher_subjects;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;
pub use system::entities::AppStartTime;
