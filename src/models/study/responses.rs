use super::entities::{Flashcard, QuizQuestion, StudyTopic};
use crate::models::subjects::entities::Subject;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct FlashcardsResponse {
    pub topic: String,
    pub flashcards: Vec<Flashcard>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct QuizResponse {
    pub topic: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/study.ts")]
pub struct TopicsResponse {
    pub topics: Vec<StudyTopic>,
    pub subjects: Vec<Subject>,
}
