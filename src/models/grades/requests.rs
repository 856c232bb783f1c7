use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub name: String,
    #[serde(default = "default_order")]
    pub order: i32,
}

fn default_order() -> i32 {
    1
}
