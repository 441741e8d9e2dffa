//! The study service: prompts, response schemas and fallbacks for the
//! four AI call sites.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::gemini::{GeminiClient, GeminiConfig};
use super::{Difficulty, Flashcard, QuizQuestion, StudyPlanItem};
use crate::config::Config;

/// Tutor reply when no credential is configured.
pub const TUTOR_OFFLINE_REPLY: &str =
    "I can help explain that concept! (Connect API Key to enable AI Tutor)";
/// Tutor reply when the model produced no usable text.
pub const TUTOR_EMPTY_REPLY: &str = "Sorry, I couldn't generate an explanation.";
/// Tutor reply when the request failed.
pub const TUTOR_ERROR_REPLY: &str = "Error connecting to AI Tutor.";

/// Thin wrapper around the Gemini client with per-call fallbacks.
///
/// Construction never fails: without a credential every operation serves
/// its canned content, so screens stay functional in demo environments.
pub struct StudyService {
    client: Option<GeminiClient>,
}

impl StudyService {
    /// Builds the service from configuration.
    pub fn from_config(config: &Config) -> Self {
        match GeminiConfig::from_settings(&config.providers.gemini) {
            Ok(gemini) => Self {
                client: Some(GeminiClient::new(gemini)),
            },
            Err(e) => {
                tracing::warn!("study tools running offline: {e:#}");
                Self { client: None }
            }
        }
    }

    /// A service with no client, always serving fallbacks.
    pub fn offline() -> Self {
        Self { client: None }
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    /// Generates a study schedule for the given subjects and hours.
    ///
    /// Offline: the canned three-slot plan. Error: an empty plan.
    pub async fn study_plan(&self, subjects: &[String], hours_available: u32) -> Vec<StudyPlanItem> {
        let Some(client) = &self.client else {
            return fallback_study_plan();
        };

        let prompt = format!(
            "Create a study schedule for a student who needs to study these subjects: {}. \
             They have {hours_available} hours available today. \
             Break it down into realistic slots including short breaks. \
             Return a list of study slots.",
            subjects.join(", ")
        );

        match client.generate_json(&prompt, plan_schema()).await {
            Ok(text) => parse_items(&text).unwrap_or_default(),
            Err(e) => {
                tracing::warn!(kind = %e.kind, "study plan generation failed: {e}");
                Vec::new()
            }
        }
    }

    /// Generates `count` flashcards for a topic.
    ///
    /// Offline: the canned two-card deck. Error: an empty deck.
    pub async fn flashcards(&self, topic: &str, count: usize) -> Vec<Flashcard> {
        let Some(client) = &self.client else {
            return fallback_flashcards();
        };

        let prompt = format!(
            "Generate {count} flashcards for the topic: \"{topic}\". \
             Each card should have a question (front) and a concise answer (back). \
             Assign a difficulty level (EASY, MEDIUM, HARD)."
        );

        match client.generate_json(&prompt, flashcard_schema()).await {
            Ok(text) => {
                let mut cards: Vec<Flashcard> = parse_items(&text).unwrap_or_default();
                for card in &mut cards {
                    card.id = uuid::Uuid::new_v4().to_string();
                }
                cards
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind, "flashcard generation failed: {e}");
                Vec::new()
            }
        }
    }

    /// Generates a three-question quiz from source text.
    ///
    /// Offline: the canned quiz. Error: an empty quiz.
    pub async fn quiz_from_text(&self, text: &str) -> Vec<QuizQuestion> {
        let Some(client) = &self.client else {
            return fallback_quiz();
        };

        let prompt = format!(
            "Generate a 3-question multiple choice quiz based on the following text: \"{text}\". \
             Return a JSON array of objects with properties: question, options (array of 4 \
             strings), and correctAnswer (index 0-3)."
        );

        match client.generate_json(&prompt, quiz_schema()).await {
            Ok(reply) => {
                let mut questions: Vec<QuizQuestion> = parse_items(&reply).unwrap_or_default();
                for question in &mut questions {
                    question.id = uuid::Uuid::new_v4().to_string();
                }
                questions
            }
            Err(e) => {
                tracing::warn!(kind = %e.kind, "quiz generation failed: {e}");
                Vec::new()
            }
        }
    }

    /// Answers a free-form tutoring question.
    pub async fn ask_tutor(&self, question: &str, subject: &str) -> String {
        let Some(client) = &self.client else {
            return TUTOR_OFFLINE_REPLY.to_string();
        };

        let prompt = format!(
            "You are an expert tutor in {subject}. Explain this concept to a high school \
             student clearly and concisely. Use analogies if helpful. Question: {question}"
        );

        match client.generate_text(&prompt).await {
            Ok(reply) if reply.trim().is_empty() => TUTOR_EMPTY_REPLY.to_string(),
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(kind = %e.kind, "tutor request failed: {e}");
                TUTOR_ERROR_REPLY.to_string()
            }
        }
    }
}

fn parse_items<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_str(text)
}

fn plan_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "time": { "type": "STRING", "description": "Start time e.g., 09:00 AM" },
                "subject": { "type": "STRING", "description": "Subject name" },
                "topic": { "type": "STRING", "description": "Specific topic to cover" },
                "duration": { "type": "STRING", "description": "Duration e.g., 45m" }
            },
            "required": ["time", "subject", "topic", "duration"]
        }
    })
}

fn flashcard_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "front": { "type": "STRING", "description": "Question" },
                "back": { "type": "STRING", "description": "Answer" },
                "difficulty": { "type": "STRING", "enum": ["EASY", "MEDIUM", "HARD"] }
            },
            "required": ["front", "back", "difficulty"]
        }
    })
}

fn quiz_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING" },
                "options": { "type": "ARRAY", "items": { "type": "STRING" } },
                "correctAnswer": { "type": "NUMBER" }
            },
            "required": ["question", "options", "correctAnswer"]
        }
    })
}

/// The canned plan served when no credential is configured.
pub fn fallback_study_plan() -> Vec<StudyPlanItem> {
    vec![
        StudyPlanItem {
            time: "09:00 AM".to_string(),
            subject: "Math".to_string(),
            topic: "Calculus Review".to_string(),
            duration: "1h".to_string(),
        },
        StudyPlanItem {
            time: "10:15 AM".to_string(),
            subject: "Physics".to_string(),
            topic: "Thermodynamics".to_string(),
            duration: "45m".to_string(),
        },
        StudyPlanItem {
            time: "11:15 AM".to_string(),
            subject: "Break".to_string(),
            topic: "Relax".to_string(),
            duration: "15m".to_string(),
        },
    ]
}

/// The canned deck served when no credential is configured.
pub fn fallback_flashcards() -> Vec<Flashcard> {
    vec![
        Flashcard {
            id: "1".to_string(),
            front: "What is the powerhouse of the cell?".to_string(),
            back: "Mitochondria".to_string(),
            difficulty: Difficulty::Easy,
        },
        Flashcard {
            id: "2".to_string(),
            front: "Newton's Second Law?".to_string(),
            back: "F = ma".to_string(),
            difficulty: Difficulty::Medium,
        },
    ]
}

/// The canned quiz served when no credential is configured.
pub fn fallback_quiz() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "1".to_string(),
            question: "What is the main idea of the summary?".to_string(),
            options: vec![
                "Idea A".to_string(),
                "Idea B".to_string(),
                "Idea C".to_string(),
                "Idea D".to_string(),
            ],
            correct_answer: 0,
        },
        QuizQuestion {
            id: "2".to_string(),
            question: "Which detail was explicitly mentioned?".to_string(),
            options: vec![
                "Detail X".to_string(),
                "Detail Y".to_string(),
                "Detail Z".to_string(),
                "None".to_string(),
            ],
            correct_answer: 1,
        },
        QuizQuestion {
            id: "3".to_string(),
            question: "What is the conclusion?".to_string(),
            options: vec![
                "Conclusion 1".to_string(),
                "Conclusion 2".to_string(),
                "Conclusion 3".to_string(),
                "Conclusion 4".to_string(),
            ],
            correct_answer: 2,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_plan_is_the_canned_three_slots() {
        let service = StudyService::offline();
        let plan = service
            .study_plan(&["Math".to_string(), "Physics".to_string()], 3)
            .await;
        assert_eq!(plan, fallback_study_plan());
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].topic, "Calculus Review");
    }

    #[tokio::test]
    async fn offline_flashcards_are_exactly_the_two_card_deck() {
        let service = StudyService::offline();
        let cards = service.flashcards("Photosynthesis", 5).await;
        assert_eq!(cards, fallback_flashcards());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].back, "Mitochondria");
        assert_eq!(cards[1].difficulty, Difficulty::Medium);
    }

    #[tokio::test]
    async fn offline_quiz_has_three_questions_with_known_answers() {
        let service = StudyService::offline();
        let quiz = service.quiz_from_text("some summary").await;
        assert_eq!(quiz.len(), 3);
        assert_eq!(
            quiz.iter().map(|q| q.correct_answer).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );
        assert!(quiz.iter().all(|q| q.options.len() == 4));
    }

    #[tokio::test]
    async fn offline_tutor_asks_for_a_key() {
        let service = StudyService::offline();
        let reply = service.ask_tutor("What is osmosis?", "Biology").await;
        assert_eq!(reply, TUTOR_OFFLINE_REPLY);
    }

    #[test]
    fn plan_items_parse_from_model_output() {
        let text = r#"[
            {"time": "08:00 AM", "subject": "Chemistry", "topic": "Stoichiometry", "duration": "30m"}
        ]"#;
        let items: Vec<StudyPlanItem> = parse_items(text).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].subject, "Chemistry");
    }

    #[test]
    fn malformed_model_output_parses_to_error() {
        let result: Result<Vec<StudyPlanItem>, _> = parse_items("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn schemas_are_arrays_of_objects() {
        for schema in [plan_schema(), flashcard_schema(), quiz_schema()] {
            assert_eq!(schema["type"], json!("ARRAY"));
            assert_eq!(schema["items"]["type"], json!("OBJECT"));
            assert!(schema["items"]["required"].is_array());
        }
    }
}
