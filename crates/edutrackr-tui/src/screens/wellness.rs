//! Wellness: mood check-in, affirmations, breathing guide.

use crossterm::event::{KeyCode, KeyEvent};
use edutrackr_core::demo;
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::{AppState, WellnessState};

pub fn content(state: &AppState) -> Vec<Line<'static>> {
    let wellness = &state.screens.wellness;
    let moods = demo::moods();

    let mut mood_line = vec!["How are you feeling?  ".into()];
    for (i, mood) in moods.iter().enumerate() {
        if wellness.mood == Some(i) {
            mood_line.push(format!("[{mood}]").bold());
        } else {
            mood_line.push(format!(" {mood} ").dim());
        }
    }
    mood_line.push("  left/right to pick".dim());

    let affirmations = demo::affirmations();
    let affirmation = affirmations[wellness.affirmation_index % affirmations.len()];

    let mut lines = vec![
        Line::from("Wellness Check-in".bold()),
        Line::default(),
        Line::from(mood_line),
        Line::default(),
        Line::from("Daily Affirmation".bold()),
        Line::from(affirmation.italic()),
        Line::from(vec!["n".bold(), " new affirmation".into()]),
        Line::default(),
        Line::from("Guided Breathing".bold()),
    ];
    for (phase, seconds) in demo::breathing_cycle() {
        lines.push(Line::from(format!("  {phase} for {seconds}s").dim()));
    }
    lines.push(Line::from(
        "Repeat the cycle four times whenever things feel heavy.".dim(),
    ));
    lines
}

pub fn handle_key(wellness: &mut WellnessState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    let mood_count = demo::moods().len();
    match key.code {
        KeyCode::Left => {
            wellness.mood = Some(match wellness.mood {
                Some(i) => i.saturating_sub(1),
                None => 0,
            });
            Some(Vec::new())
        }
        KeyCode::Right => {
            wellness.mood = Some(match wellness.mood {
                Some(i) if i + 1 < mood_count => i + 1,
                Some(i) => i,
                None => 0,
            });
            Some(Vec::new())
        }
        KeyCode::Char('n') => {
            wellness.affirmation_index =
                (wellness.affirmation_index + 1) % demo::affirmations().len();
            Some(Vec::new())
        }
        _ => None,
    }
}
