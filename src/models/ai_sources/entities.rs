use serde::{Deserialize, Serialize};
use ts_rs::TS;

// AI 知识来源（教师上传的学习资料）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ai_source.ts")]
pub struct AiSource {
    pub id: String,
    pub uploaded_by_user_id: String,
    pub subject_id: Option<String>,
    pub grade_id: Option<String>,
    pub file_name: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub file_path: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
