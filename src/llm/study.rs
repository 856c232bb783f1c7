//! 学习卡片与测验的提示词及模型输出解析
//!
//! 模型被要求只输出 JSON 数组；实际回复常带有 Markdown 代码块或前后说明，
//! 解析时截取第一个 `[` 到最后一个 `]` 之间的内容。

use serde::de::DeserializeOwned;

use crate::errors::{PocketBuddyError, Result};
use crate::models::study::entities::{Flashcard, QuizQuestion};

const STUDY_PERSONA: &str = "Si PocketBuddy, AI asistent pre slovenských stredoškolákov. \
Pripravuješ študijné materiály po slovensky, jednoducho a vecne správne. \
Odpovedáš výhradne platným JSON bez ďalšieho textu.";

/// 生成学习材料的系统提示词，指定科目时附上科目名
pub fn build_study_system_prompt(subject_name: Option<&str>) -> String {
    match subject_name {
        Some(name) => format!("{STUDY_PERSONA}\nPredmet: {name}"),
        None => STUDY_PERSONA.to_string(),
    }
}

pub fn build_flashcards_prompt(topic: &str, count: u32) -> String {
    format!(
        "Vytvor {count} učebných kartičiek na tému \"{topic}\".\n\
         Vráť JSON pole objektov v tvare:\n\
         [{{\"otazka\": \"otázka alebo pojem\", \"odpoved\": \"stručná odpoveď\"}}]"
    )
}

pub fn build_quiz_prompt(topic: &str, question_count: u32) -> String {
    format!(
        "Vytvor kvíz s {question_count} otázkami na tému \"{topic}\".\n\
         Každá otázka má štyri možnosti označené A) až D) a práve jednu správnu.\n\
         Vráť JSON pole objektov v tvare:\n\
         [{{\"otazka\": \"...\", \"moznosti\": [\"A) ...\", \"B) ...\", \"C) ...\", \"D) ...\"], \
         \"spravna\": \"A\", \"vysvetlenie\": \"prečo je odpoveď správna\"}}]"
    )
}

/// 从模型回复中取出 JSON 数组并反序列化
pub fn parse_json_array<T: DeserializeOwned>(reply: &str) -> Result<Vec<T>> {
    let (Some(start), Some(end)) = (reply.find('['), reply.rfind(']')) else {
        return Err(PocketBuddyError::llm_response(
            "model reply contains no JSON array",
        ));
    };
    if end < start {
        return Err(PocketBuddyError::llm_response(
            "model reply contains no JSON array",
        ));
    }

    serde_json::from_str(&reply[start..=end])
        .map_err(|e| PocketBuddyError::llm_response(format!("invalid JSON array: {e}")))
}

/// 解析学习卡片，丢弃空卡片并截断到请求数量
pub fn parse_flashcards(reply: &str, limit: u32) -> Result<Vec<Flashcard>> {
    let cards: Vec<Flashcard> = parse_json_array(reply)?;
    Ok(cards
        .into_iter()
        .map(|card| Flashcard {
            question: card.question.trim().to_string(),
            answer: card.answer.trim().to_string(),
        })
        .filter(|card| !card.question.is_empty() && !card.answer.is_empty())
        .take(limit as usize)
        .collect())
}

/// 解析测验题目，丢弃正确答案不在选项范围内的题目
pub fn parse_quiz(reply: &str, limit: u32) -> Result<Vec<QuizQuestion>> {
    let questions: Vec<QuizQuestion> = parse_json_array(reply)?;
    Ok(questions
        .into_iter()
        .filter_map(normalize_question)
        .take(limit as usize)
        .collect())
}

fn normalize_question(mut question: QuizQuestion) -> Option<QuizQuestion> {
    question.question = question.question.trim().to_string();
    if question.question.is_empty() || question.options.len() < 2 {
        return None;
    }

    // 模型有时返回 "b" 或 "B)"，只保留字母
    let letter = question
        .correct
        .trim()
        .chars()
        .next()?
        .to_ascii_uppercase();
    let index = (letter as usize).checked_sub('A' as usize)?;
    if !letter.is_ascii_uppercase() || index >= question.options.len() {
        return None;
    }

    question.correct = letter.to_string();
    question.explanation = question
        .explanation
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty());
    Some(question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flashcards_inside_code_fence() {
        let reply = "Tu sú kartičky:\n```json\n[\
            {\"otazka\": \"a² + b² = ?\", \"odpoved\": \"c²\"},\
            {\"otazka\": \"  \", \"odpoved\": \"prázdna\"}\
            ]\n```";
        let cards = parse_flashcards(reply, 10).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "a² + b² = ?");
        assert_eq!(cards[0].answer, "c²");
    }

    #[test]
    fn test_parse_flashcards_truncates_to_limit() {
        let reply = r#"[{"otazka":"1","odpoved":"a"},{"otazka":"2","odpoved":"b"},{"otazka":"3","odpoved":"c"}]"#;
        assert_eq!(parse_flashcards(reply, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_reply_without_array_is_rejected() {
        let err = parse_flashcards("Prepáč, neviem.", 5).err().unwrap();
        assert_eq!(err.code(), "E013");

        let err = parse_flashcards("] nie [", 5).err().unwrap();
        assert_eq!(err.code(), "E013");
    }

    #[test]
    fn test_parse_quiz_normalizes_answer_letter() {
        let reply = r#"[
            {"otazka": "Kde prebieha fotosyntéza?",
             "moznosti": ["A) mitochondrie", "B) chloroplasty", "C) jadro", "D) ribozómy"],
             "spravna": "b)", "vysvetlenie": " Chlorofyl je v chloroplastoch. "},
            {"otazka": "Zlá otázka", "moznosti": ["A) x", "B) y"], "spravna": "D"},
            {"otazka": "Bez vysvetlenia", "moznosti": ["A) áno", "B) nie"], "spravna": "A"}
        ]"#;
        let questions = parse_quiz(reply, 5).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct, "B");
        assert_eq!(
            questions[0].explanation.as_deref(),
            Some("Chlorofyl je v chloroplastoch.")
        );
        assert_eq!(questions[1].explanation, None);
    }

    #[test]
    fn test_prompts_mention_topic_and_count() {
        let prompt = build_quiz_prompt("Fotosyntéza", 3);
        assert!(prompt.contains("3 otázkami"));
        assert!(prompt.contains("\"Fotosyntéza\""));
        assert!(build_flashcards_prompt("Pytagorova veta", 7).starts_with("Vytvor 7 "));
        assert!(build_study_system_prompt(Some("Matematika")).ends_with("Predmet: Matematika"));
    }
}
