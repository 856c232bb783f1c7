use serde::Deserialize;
use ts_rs::TS;

// 更新 AI 来源
#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/ai_source.ts")]
pub struct UpdateAiSourceRequest {
    pub description: Option<String>,
    pub subject_id: Option<String>,
    pub grade_id: Option<String>,
    pub is_active: Option<bool>,
}

/// 存储层创建参数
#[derive(Debug, Clone)]
pub struct CreateAiSource {
    pub id: String,
    pub uploaded_by_user_id: String,
    pub subject_id: Option<String>,
    pub grade_id: Option<String>,
    pub file_name: String,
    pub file_path: String,
    pub description: Option<String>,
}

/// 列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct AiSourceFilter {
    /// 仅返回该用户上传的
    pub uploaded_by: Option<String>,
    pub active_only: bool,
    /// 仅返回该年级或未指定年级的
    pub grade_or_unassigned: Option<String>,
    pub limit: Option<u64>,
}

/// 存储层更新参数，`Some(None)` 表示清除
#[derive(Debug, Clone, Default)]
pub struct AiSourceUpdate {
    pub description: Option<Option<String>>,
    pub subject_id: Option<Option<String>>,
    pub grade_id: Option<Option<String>>,
    pub is_active: Option<bool>,
}
