//! AI-backed study tools: plan, flashcards, quiz and tutor.
//!
//! The Gemini client lives in [`gemini`]; [`service::StudyService`] wraps
//! it with the prompts, response schemas and fallback semantics of each
//! call site. Failures never leave this module as errors: a missing
//! credential yields canned content and a transport failure yields an
//! empty result (or an apologetic string for the tutor).

pub mod gemini;
pub mod service;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use service::StudyService;

/// One slot of a generated study schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPlanItem {
    /// Start time, e.g. "09:00 AM".
    pub time: String,
    pub subject: String,
    pub topic: String,
    /// Duration, e.g. "45m".
    pub duration: String,
}

/// Flashcard difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A question/answer study card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Assigned locally after generation; the model never produces ids.
    #[serde(default)]
    pub id: String,
    pub front: String,
    pub back: String,
    pub difficulty: Difficulty,
}

/// A multiple-choice quiz question with four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Assigned locally after generation; the model never produces ids.
    #[serde(default)]
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct option (0-3).
    #[serde(rename = "correctAnswer")]
    pub correct_answer: usize,
}

/// Categories of service errors for consistent logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Connection timeout or request timeout
    Timeout,
    /// Failed to parse the response body
    Parse,
}

impl std::fmt::Display for ServiceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceErrorKind::HttpStatus => write!(f, "http_status"),
            ServiceErrorKind::Timeout => write!(f, "timeout"),
            ServiceErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured transport error from the Gemini boundary.
#[derive(Debug, Clone)]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    /// One-line summary suitable for a log line.
    pub message: String,
    /// Optional raw error body.
    pub details: Option<String>,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Creates an HTTP status error, extracting the provider's own
    /// message from the body when it is the usual error JSON.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = format!("HTTP {status}");
        let details = if body.is_empty() {
            None
        } else {
            if let Ok(json) = serde_json::from_str::<Value>(body)
                && let Some(error_obj) = json.get("error")
                && let Some(msg) = error_obj.get("message").and_then(|v| v.as_str())
            {
                return Self {
                    kind: ServiceErrorKind::HttpStatus,
                    message: format!("HTTP {status}: {msg}"),
                    details: Some(body.to_string()),
                };
            }
            Some(body.to_string())
        };
        Self {
            kind: ServiceErrorKind::HttpStatus,
            message,
            details,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Timeout, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Parse, message)
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ServiceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_extracts_provider_message() {
        let body = r#"{"error": {"code": 429, "message": "Resource exhausted"}}"#;
        let err = ServiceError::http_status(429, body);
        assert_eq!(err.kind, ServiceErrorKind::HttpStatus);
        assert_eq!(err.message, "HTTP 429: Resource exhausted");
        assert!(err.details.is_some());
    }

    #[test]
    fn http_status_keeps_opaque_bodies_as_details() {
        let err = ServiceError::http_status(500, "upstream exploded");
        assert_eq!(err.message, "HTTP 500");
        assert_eq!(err.details.as_deref(), Some("upstream exploded"));
    }

    #[test]
    fn difficulty_uses_wire_casing() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, r#""MEDIUM""#);
        let parsed: Difficulty = serde_json::from_str(r#""HARD""#).unwrap();
        assert_eq!(parsed, Difficulty::Hard);
    }

    #[test]
    fn quiz_question_parses_the_wire_shape() {
        let parsed: QuizQuestion = serde_json::from_str(
            r#"{"question": "Q?", "options": ["a", "b", "c", "d"], "correctAnswer": 2}"#,
        )
        .unwrap();
        assert_eq!(parsed.id, "");
        assert_eq!(parsed.correct_answer, 2);
        assert_eq!(parsed.options.len(), 4);
    }
}
