//! Parent-teacher chat.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::{AppState, ChatState};

pub fn content(state: &AppState) -> Vec<Line<'static>> {
    let chat = &state.screens.chat;
    let mut lines = vec![
        Line::from(vec!["Mr. Anderson".bold(), "  ● Online".green()]),
        Line::default(),
    ];
    for entry in &chat.log {
        let who = if entry.is_me {
            "Me".bold().blue()
        } else {
            entry.sender.clone().bold()
        };
        lines.push(Line::from(vec![
            who,
            format!(" ({})", entry.time).dim(),
        ]));
        lines.push(Line::from(format!("  {}", entry.body)));
    }
    lines.push(Line::default());
    let mut input = vec!["Type a message: ".dim(), chat.input.clone().into()];
    if chat.editing {
        input.push("▏".blue());
    }
    lines.push(Line::from(input));
    if !chat.editing {
        lines.push(Line::from(vec![
            "e".bold(),
            " type    ".into(),
            "enter".bold(),
            " send".into(),
        ]));
    }
    lines
}

pub fn handle_key(chat: &mut ChatState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    if chat.editing {
        match key.code {
            KeyCode::Esc => chat.editing = false,
            KeyCode::Enter => send(chat),
            KeyCode::Backspace => {
                chat.input.pop();
            }
            KeyCode::Char(c) => chat.input.push(c),
            _ => {}
        }
        return Some(Vec::new());
    }

    match key.code {
        KeyCode::Char('e') => {
            chat.editing = true;
            Some(Vec::new())
        }
        KeyCode::Enter => {
            send(chat);
            Some(Vec::new())
        }
        _ => None,
    }
}

fn send(chat: &mut ChatState) {
    let body = chat.input.trim().to_string();
    if body.is_empty() {
        return;
    }
    chat.push_own(body);
    chat.input.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ScreensState;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn empty_messages_are_not_sent() {
        let mut chat = ScreensState::default().chat;
        let before = chat.log.len();
        handle_key(&mut chat, key(KeyCode::Enter));
        assert_eq!(chat.log.len(), before);
    }

    #[test]
    fn typed_message_is_appended_as_own() {
        let mut chat = ScreensState::default().chat;
        let before = chat.log.len();
        handle_key(&mut chat, key(KeyCode::Char('e')));
        for c in "On my way".chars() {
            handle_key(&mut chat, key(KeyCode::Char(c)));
        }
        handle_key(&mut chat, key(KeyCode::Enter));

        assert_eq!(chat.log.len(), before + 1);
        let last = chat.log.last().unwrap();
        assert!(last.is_me);
        assert_eq!(last.body, "On my way");
        assert!(chat.input.is_empty());
    }
}
