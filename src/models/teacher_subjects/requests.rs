use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher_subject.ts")]
pub struct AssignSubjectRequest {
    pub subject_id: String,
    pub grade_id: Option<String>,
}
