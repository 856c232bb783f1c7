use super::entities::AiSource;
use serde::Serialize;
use ts_rs::TS;

// 附带上传者、科目、年级名称的来源
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ai_source.ts")]
pub struct AiSourceDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub source: AiSource,
    pub uploaded_by_name: Option<String>,
    pub subject_name: Option<String>,
    pub grade_name: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ai_source.ts")]
pub struct AiSourceListResponse {
    pub items: Vec<AiSourceDetail>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ai_source.ts")]
pub struct AiSourceUploadResponse {
    pub id: String,
    pub file_name: String,
}
