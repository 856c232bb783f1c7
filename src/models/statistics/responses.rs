use serde::Serialize;
use ts_rs::TS;

// 管理后台统计
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/statistics.ts")]
pub struct StatisticsResponse {
    pub total_users: i64,
    pub students: i64,
    pub teachers: i64,
    pub pending_requests: i64,
    pub total_sources: i64,
    pub total_chats: i64,
}
