use serde::Deserialize;
use ts_rs::TS;

pub const DEFAULT_FLASHCARD_COUNT: u32 = 10;
pub const DEFAULT_QUESTION_COUNT: u32 = 5;

/// 单次生成的数量上限
pub const MAX_GENERATED_ITEMS: u32 = 20;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct GenerateFlashcardsRequest {
    pub topic: String,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default = "default_flashcard_count")]
    pub count: u32,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct GenerateQuizRequest {
    pub topic: String,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default = "default_question_count")]
    pub question_count: u32,
}

fn default_flashcard_count() -> u32 {
    DEFAULT_FLASHCARD_COUNT
}

fn default_question_count() -> u32 {
    DEFAULT_QUESTION_COUNT
}
