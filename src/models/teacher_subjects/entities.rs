use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师任教科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_subject.ts")]
pub struct TeacherSubject {
    pub id: String,
    pub teacher_id: String,
    pub subject_id: String,
    pub grade_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
