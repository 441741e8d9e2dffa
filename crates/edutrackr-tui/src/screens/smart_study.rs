//! Smart study tools: flashcard creator, tutor chat, notes summarizer
//! with knowledge-check quiz.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::{AppState, SmartStudyState, StudyTool};

/// Cards requested per generated deck.
const DECK_SIZE: usize = 5;

pub fn content(state: &AppState) -> Vec<Line<'static>> {
    let smart = &state.screens.smart;
    let mut lines = vec![tool_tabs(smart), Line::default()];

    match smart.tool {
        StudyTool::Flashcards => flashcards(smart, &mut lines),
        StudyTool::AiTutor => tutor(smart, &mut lines),
        StudyTool::Notes => notes(smart, &mut lines),
    }
    lines
}

fn tool_tabs(smart: &SmartStudyState) -> Line<'static> {
    let mut spans = Vec::new();
    for tool in [StudyTool::Flashcards, StudyTool::AiTutor, StudyTool::Notes] {
        if tool == smart.tool {
            spans.push(format!("[{}]", tool.label()).bold().blue());
        } else {
            spans.push(format!(" {} ", tool.label()).dim());
        }
        spans.push("  ".into());
    }
    spans.push("tab to switch".dim());
    Line::from(spans)
}

fn input_line(label: &'static str, value: &str, editing: bool) -> Line<'static> {
    let mut spans = vec![format!("{label}: ").dim(), value.to_string().into()];
    if editing {
        spans.push("▏".blue());
    }
    Line::from(spans)
}

fn flashcards(smart: &SmartStudyState, lines: &mut Vec<Line<'static>>) {
    if smart.cards_loading {
        lines.push(Line::from("Creating your deck...".dim()));
        return;
    }

    if smart.cards.is_empty() {
        lines.push(Line::from("AI Flashcard Creator".bold()));
        lines.push(Line::from(
            "Enter a topic, and I'll generate study cards for you.",
        ));
        lines.push(Line::default());
        lines.push(input_line("Topic", &smart.topic, smart.editing));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            "e".bold(),
            " edit topic    ".into(),
            "enter".bold(),
            " create".into(),
        ]));
        return;
    }

    let card = &smart.cards[smart.card_index];
    lines.push(Line::from(
        format!("Question {}/{}", smart.card_index + 1, smart.cards.len()).dim(),
    ));
    lines.push(Line::default());
    if smart.flipped {
        lines.push(Line::from("Answer".dim()));
        lines.push(Line::from(card.back.clone().bold().green()));
    } else {
        lines.push(Line::from(card.front.clone().bold()));
        lines.push(Line::from("space to flip".dim()));
    }
    lines.push(Line::default());
    lines.push(Line::from(format!("Difficulty: {}", card.difficulty.label()).dim()));
    lines.push(Line::default());
    if smart.card_index + 1 == smart.cards.len() {
        lines.push(Line::from("Deck completed! +50 XP".yellow()));
    }
    lines.push(Line::from(vec![
        "n".bold(),
        " next    ".into(),
        "s".bold(),
        " start new deck".into(),
    ]));
}

fn tutor(smart: &SmartStudyState, lines: &mut Vec<Line<'static>>) {
    for message in &smart.tutor_log {
        if message.from_user {
            lines.push(Line::from(vec!["You: ".bold().blue(), message.text.clone().into()]));
        } else {
            lines.push(Line::from(vec!["Tutor: ".bold(), message.text.clone().into()]));
        }
    }
    if smart.tutor_loading {
        lines.push(Line::from("Thinking...".dim()));
    }
    lines.push(Line::default());
    lines.push(input_line("Ask a question", &smart.tutor_input, smart.editing));
    if !smart.editing {
        lines.push(Line::from(vec!["e".bold(), " type    ".into(), "enter".bold(), " send".into()]));
    }
}

fn notes(smart: &SmartStudyState, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from("Notes Magician".bold()));
    lines.push(Line::from(
        "Paste your rough notes, and AI will organize them into bullet",
    ));
    lines.push(Line::from("points."));
    lines.push(Line::default());

    let Some(summary) = &smart.summary else {
        if smart.summary_loading {
            lines.push(Line::from("Generating Summary...".dim()));
            return;
        }
        lines.push(input_line("Notes", &smart.notes, smart.editing));
        lines.push(Line::default());
        lines.push(Line::from(vec![
            "e".bold(),
            " edit notes    ".into(),
            "enter".bold(),
            " summarize".into(),
        ]));
        return;
    };

    for part in summary.lines() {
        lines.push(Line::from(part.to_string()));
    }
    lines.push(Line::default());

    if smart.quiz_loading {
        lines.push(Line::from("Preparing a quiz...".dim()));
        return;
    }

    if smart.quiz.is_empty() {
        lines.push(Line::from(vec![
            "u".bold(),
            " take quiz    ".into(),
            "o".bold(),
            " start over".into(),
        ]));
        return;
    }

    lines.push(Line::from("Knowledge Check".bold().yellow()));
    for (qi, question) in smart.quiz.iter().enumerate() {
        let marker = if qi == smart.quiz_cursor { "> " } else { "  " };
        lines.push(Line::from(format!("{marker}{}. {}", qi + 1, question.question).bold()));
        for (oi, option) in question.options.iter().enumerate() {
            let letter = (b'a' + oi as u8) as char;
            let chosen = smart.answers.get(qi).copied().flatten() == Some(oi);
            let span = if smart.show_results && oi == question.correct_answer {
                format!("   {letter}) {option}").green()
            } else if smart.show_results && chosen {
                format!("   {letter}) {option}").red()
            } else if chosen {
                format!("   {letter}) {option}").bold().blue()
            } else {
                format!("   {letter}) {option}").into()
            };
            lines.push(Line::from(span));
        }
    }
    lines.push(Line::default());
    if smart.show_results {
        lines.push(Line::from(
            format!("Score: {} / {}", smart.quiz_score(), smart.quiz.len()).bold(),
        ));
        lines.push(Line::from(vec!["o".bold(), " finish & close".into()]));
    } else {
        lines.push(Line::from(vec![
            "up/down".bold(),
            " question    ".into(),
            "a-d".bold(),
            " answer    ".into(),
            "enter".bold(),
            " check answers".into(),
        ]));
    }
}

pub fn handle_key(smart: &mut SmartStudyState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    if smart.editing {
        return Some(handle_editing_key(smart, key));
    }

    match key.code {
        KeyCode::Tab => {
            smart.tool = smart.tool.next();
            Some(Vec::new())
        }
        KeyCode::Char('e') => {
            if tool_input_available(smart) {
                smart.editing = true;
            }
            Some(Vec::new())
        }
        KeyCode::Enter => Some(submit_active_tool(smart)),
        _ => match smart.tool {
            StudyTool::Flashcards => handle_deck_key(smart, key),
            StudyTool::Notes => handle_notes_key(smart, key),
            StudyTool::AiTutor => None,
        },
    }
}

/// Whether the active tool currently shows a text input.
fn tool_input_available(smart: &SmartStudyState) -> bool {
    match smart.tool {
        StudyTool::Flashcards => smart.cards.is_empty() && !smart.cards_loading,
        StudyTool::AiTutor => !smart.tutor_loading,
        StudyTool::Notes => smart.summary.is_none() && !smart.summary_loading,
    }
}

fn handle_editing_key(smart: &mut SmartStudyState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Esc => {
            smart.editing = false;
            Vec::new()
        }
        KeyCode::Enter => submit_active_tool(smart),
        KeyCode::Backspace => {
            active_input(smart).pop();
            Vec::new()
        }
        KeyCode::Char(c) => {
            active_input(smart).push(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn active_input(smart: &mut SmartStudyState) -> &mut String {
    match smart.tool {
        StudyTool::Flashcards => &mut smart.topic,
        StudyTool::AiTutor => &mut smart.tutor_input,
        StudyTool::Notes => &mut smart.notes,
    }
}

fn submit_active_tool(smart: &mut SmartStudyState) -> Vec<UiEffect> {
    match smart.tool {
        StudyTool::Flashcards => {
            if smart.topic.trim().is_empty() || smart.cards_loading || !smart.cards.is_empty() {
                return Vec::new();
            }
            smart.cards_loading = true;
            smart.editing = false;
            vec![UiEffect::GenerateFlashcards {
                topic: smart.topic.clone(),
                count: DECK_SIZE,
            }]
        }
        StudyTool::AiTutor => {
            let question = smart.tutor_input.trim().to_string();
            if question.is_empty() || smart.tutor_loading {
                return Vec::new();
            }
            smart.tutor_log.push(crate::state::TutorMessage {
                from_user: true,
                text: question.clone(),
            });
            smart.tutor_input.clear();
            smart.tutor_loading = true;
            vec![UiEffect::AskTutor {
                question,
                subject: "General".to_string(),
            }]
        }
        StudyTool::Notes => {
            // With a quiz on screen, enter grades it.
            if smart.summary.is_some() {
                if !smart.quiz.is_empty() && !smart.show_results {
                    smart.show_results = true;
                }
                return Vec::new();
            }
            if smart.notes.trim().is_empty() || smart.summary_loading {
                return Vec::new();
            }
            smart.summary_loading = true;
            smart.editing = false;
            vec![UiEffect::SummarizeNotes {
                text: smart.notes.clone(),
            }]
        }
    }
}

fn handle_deck_key(smart: &mut SmartStudyState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    if smart.cards.is_empty() {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') => {
            smart.flipped = !smart.flipped;
            Some(Vec::new())
        }
        KeyCode::Char('n') | KeyCode::Right => {
            if smart.card_index + 1 < smart.cards.len() {
                smart.card_index += 1;
                smart.flipped = false;
            }
            Some(Vec::new())
        }
        KeyCode::Char('s') => {
            smart.cards.clear();
            smart.card_index = 0;
            smart.flipped = false;
            smart.topic.clear();
            Some(Vec::new())
        }
        _ => None,
    }
}

fn handle_notes_key(smart: &mut SmartStudyState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    if smart.summary.is_none() {
        return None;
    }
    match key.code {
        KeyCode::Char('u') if smart.quiz.is_empty() && !smart.quiz_loading => {
            smart.quiz_loading = true;
            let text = smart.summary.clone().unwrap_or_default();
            Some(vec![UiEffect::GenerateQuiz { text }])
        }
        KeyCode::Char('o') => {
            smart.reset_notes();
            Some(Vec::new())
        }
        KeyCode::Up if !smart.quiz.is_empty() => {
            smart.quiz_cursor = smart.quiz_cursor.saturating_sub(1);
            Some(Vec::new())
        }
        KeyCode::Down if !smart.quiz.is_empty() => {
            if smart.quiz_cursor + 1 < smart.quiz.len() {
                smart.quiz_cursor += 1;
            }
            Some(Vec::new())
        }
        KeyCode::Char(c @ 'a'..='d') if !smart.quiz.is_empty() && !smart.show_results => {
            let option = (c as u8 - b'a') as usize;
            if let Some(slot) = smart.answers.get_mut(smart.quiz_cursor) {
                *slot = Some(option);
            }
            Some(Vec::new())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use edutrackr_core::study::service::fallback_quiz;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(smart: &mut SmartStudyState, text: &str) {
        for c in text.chars() {
            handle_key(smart, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn flashcard_submission_requires_a_topic() {
        let mut smart = SmartStudyState::default();
        assert_eq!(handle_key(&mut smart, key(KeyCode::Enter)), Some(Vec::new()));

        handle_key(&mut smart, key(KeyCode::Char('e')));
        assert!(smart.editing);
        type_str(&mut smart, "Photosynthesis");
        let effects = handle_key(&mut smart, key(KeyCode::Enter)).unwrap();
        assert_eq!(
            effects,
            vec![UiEffect::GenerateFlashcards {
                topic: "Photosynthesis".to_string(),
                count: DECK_SIZE,
            }]
        );
        assert!(smart.cards_loading);
        assert!(!smart.editing);
    }

    #[test]
    fn editing_consumes_digits_instead_of_navigating() {
        let mut smart = SmartStudyState::default();
        handle_key(&mut smart, key(KeyCode::Char('e')));
        let consumed = handle_key(&mut smart, key(KeyCode::Char('1')));
        assert!(consumed.is_some());
        assert_eq!(smart.topic, "1");
    }

    #[test]
    fn tutor_send_logs_the_question_and_clears_input() {
        let mut smart = SmartStudyState::default();
        smart.tool = StudyTool::AiTutor;
        handle_key(&mut smart, key(KeyCode::Char('e')));
        type_str(&mut smart, "What is osmosis?");
        let effects = handle_key(&mut smart, key(KeyCode::Enter)).unwrap();
        assert_eq!(
            effects,
            vec![UiEffect::AskTutor {
                question: "What is osmosis?".to_string(),
                subject: "General".to_string(),
            }]
        );
        assert!(smart.tutor_loading);
        assert!(smart.tutor_input.is_empty());
        assert!(smart.tutor_log.last().unwrap().from_user);
    }

    #[test]
    fn quiz_answers_are_scored_on_check() {
        let mut smart = SmartStudyState::default();
        smart.tool = StudyTool::Notes;
        smart.summary = Some("summary".to_string());
        smart.quiz = fallback_quiz();
        smart.answers = vec![None; smart.quiz.len()];

        handle_key(&mut smart, key(KeyCode::Char('a')));
        handle_key(&mut smart, key(KeyCode::Down));
        handle_key(&mut smart, key(KeyCode::Char('b')));
        handle_key(&mut smart, key(KeyCode::Enter));

        assert!(smart.show_results);
        assert_eq!(smart.quiz_score(), 2);
    }
}
