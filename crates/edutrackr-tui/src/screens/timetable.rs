//! Weekly schedule with a day selector.

use crossterm::event::{KeyCode, KeyEvent};
use edutrackr_core::demo::{self, WEEK_DAYS};
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::AppState;

pub fn content(state: &AppState) -> Vec<Line<'static>> {
    let day = state.screens.timetable_day;
    let mut tabs = Vec::new();
    for (i, label) in WEEK_DAYS.iter().enumerate() {
        if i == day {
            tabs.push(format!("[{label}]").bold().blue());
        } else {
            tabs.push(format!(" {label} ").dim());
        }
        tabs.push(" ".into());
    }
    tabs.push("left/right to switch".dim());

    let mut lines = vec![
        Line::from("Weekly Schedule".bold()),
        Line::from(tabs),
        Line::default(),
    ];
    for session in demo::timetable(day) {
        lines.push(Line::from(vec![
            format!("{:<9}", session.time).bold(),
            format!("{:<5}", session.duration).dim(),
            format!("{:<18}", session.subject).into(),
            format!("{:<9}", session.kind.label()).dim(),
            format!("{:<10}", session.room).into(),
            session.teacher.dim(),
        ]));
    }
    lines
}

pub fn handle_key(day: &mut usize, key: KeyEvent) -> Option<Vec<UiEffect>> {
    match key.code {
        KeyCode::Left => {
            *day = day.saturating_sub(1);
            Some(Vec::new())
        }
        KeyCode::Right => {
            if *day + 1 < WEEK_DAYS.len() {
                *day += 1;
            }
            Some(Vec::new())
        }
        _ => None,
    }
}
