//! PocketBuddy 系统提示词

use crate::models::ai_sources::entities::AiSource;

/// 写入系统提示词的来源上限
pub const MAX_PROMPT_SOURCES: usize = 10;

/// 发送给模型的历史消息上限
pub const HISTORY_LIMIT: u64 = 10;

/// 模型调用失败时的回复
pub const APOLOGY_REPLY: &str =
    "Ospravedlňujem sa, momentálne mám technické problémy. Skús to prosím znova neskôr.";

const PERSONA: &str = "Si PocketBuddy, priateľský a inteligentný AI asistent pre slovenské stredné školy. 😊

Tvoje hlavné vlastnosti:
- Komunikuješ po slovensky
- Si trpezlivý a povzbudzujúci 💪
- Vysvetľuješ veci jednoducho a zrozumiteľne
- Pri matematických úlohách vysvetľuješ krok po kroku, ako keby si učil bežného stredoškoláka
- Nepoužívaš príliš formálny alebo akademický jazyk
- Si tu, aby si pomohol študentom pochopiť látku, nie len dal odpovede
- Používaš emotikony na oživenie konverzácie 🎓📚✨
- NIKDY nepoužívaj hviezdičky (**) na formátovanie textu, píš normálne

Pri riešení matematických úloh:
1. Najprv vysvetli, čo je úlohou 🤔
2. Ukáž riešenie krok po kroku
3. Pri každom kroku vysvetli PREČO sa robí daný krok
4. Na konci zhrň riešenie ✅

Buď priateľský a používaj emotikony! 😄
";

/// 人设文本后附上最多 10 个学习材料
pub fn build_system_prompt(sources: &[AiSource]) -> String {
    let mut prompt = PERSONA.to_string();
    if sources.is_empty() {
        return prompt;
    }

    prompt.push_str("\nMáš prístup k nasledujúcim študijným materiálom:\n");
    for source in sources.iter().take(MAX_PROMPT_SOURCES) {
        prompt.push_str("- ");
        prompt.push_str(&source.file_name);
        if let Some(description) = source.description.as_deref().filter(|d| !d.is_empty()) {
            prompt.push_str(": ");
            prompt.push_str(description);
        }
        prompt.push('\n');
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, description: Option<&str>) -> AiSource {
        AiSource {
            id: name.to_string(),
            uploaded_by_user_id: "t".to_string(),
            subject_id: None,
            grade_id: None,
            file_name: name.to_string(),
            file_path: String::new(),
            description: description.map(str::to_string),
            is_active: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_prompt_without_sources_is_persona() {
        let prompt = build_system_prompt(&[]);
        assert!(prompt.starts_with("Si PocketBuddy"));
        assert!(!prompt.contains("študijným materiálom"));
    }

    #[test]
    fn test_prompt_lists_sources() {
        let prompt = build_system_prompt(&[
            source("derivacie.pdf", Some("Derivácie funkcií")),
            source("vzorce.pdf", None),
        ]);
        assert!(prompt.contains("- derivacie.pdf: Derivácie funkcií\n"));
        assert!(prompt.contains("- vzorce.pdf\n"));
    }

    #[test]
    fn test_prompt_caps_sources() {
        let sources: Vec<_> = (0..15).map(|i| source(&format!("f{i:02}.pdf"), None)).collect();
        let prompt = build_system_prompt(&sources);
        assert!(prompt.contains("- f09.pdf"));
        assert!(!prompt.contains("- f10.pdf"));
    }
}
