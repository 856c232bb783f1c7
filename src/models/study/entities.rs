use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学习卡片，字段名与模型输出及前端保持一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct Flashcard {
    #[serde(rename = "otazka")]
    pub question: String,
    #[serde(rename = "odpoved")]
    pub answer: String,
}

// 单选题，`correct` 为选项字母（A-D）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct QuizQuestion {
    #[serde(rename = "otazka")]
    pub question: String,
    #[serde(rename = "moznosti")]
    pub options: Vec<String>,
    #[serde(rename = "spravna")]
    pub correct: String,
    #[serde(rename = "vysvetlenie", default)]
    pub explanation: Option<String>,
}

// 由 AI 来源得到的学习主题
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct StudyTopic {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub subject_id: Option<String>,
    pub subject_name: Option<String>,
}
