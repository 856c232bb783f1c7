use crate::models::grades::entities::Grade;
use crate::models::subjects::entities::Subject;
use serde::Serialize;
use ts_rs::TS;

// 带科目与年级详情的分配
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_subject.ts")]
pub struct TeacherSubjectDetail {
    pub id: String,
    pub subject: Option<Subject>,
    pub grade: Option<Grade>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_subject.ts")]
pub struct TeacherSubjectListResponse {
    pub items: Vec<TeacherSubjectDetail>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_subject.ts")]
pub struct AssignSubjectResponse {
    pub id: String,
}
