use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct ApiInfoResponse {
    pub message: String,
    pub version: String,
    pub uptime_seconds: i64,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/system.ts")]
pub struct SeedResponse {
    pub seeded: bool,
    pub grades: usize,
    pub subjects: usize,
    pub classes: usize,
}
