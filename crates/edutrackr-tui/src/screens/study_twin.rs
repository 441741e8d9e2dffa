//! Study partner matching.

use crossterm::event::{KeyCode, KeyEvent};
use edutrackr_core::demo;
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::{AppState, StudyTwinState};

pub fn content(state: &AppState) -> Vec<Line<'static>> {
    let twin = &state.screens.twin;
    let partners = demo::study_partners();

    if let Some(matched) = twin.matched {
        let partner = &partners[matched % partners.len()];
        return vec![
            Line::default(),
            Line::from("It's a match!".bold().green()),
            Line::default(),
            Line::from(partner.name.bold()),
            Line::from(format!("Studies: {}", partner.subjects.join(", "))),
            Line::from(format!("{}% compatible", partner.compatibility).dim()),
            Line::default(),
            Line::from("Hey! Let's crush these exams! 📚".italic()),
        ];
    }

    let partner = &partners[twin.partner_index % partners.len()];
    vec![
        Line::from("Find your StudyTwin".bold()),
        Line::from(
            format!("Profile {}/{}", twin.partner_index % partners.len() + 1, partners.len()).dim(),
        ),
        Line::default(),
        Line::from(partner.name.bold()),
        Line::from(format!("Studies: {}", partner.subjects.join(", "))),
        Line::from(format!("{}% compatible", partner.compatibility).dim()),
        Line::default(),
        Line::from(vec![
            "y".bold().green(),
            " match    ".into(),
            "n".bold(),
            " next profile".into(),
        ]),
    ]
}

pub fn handle_key(twin: &mut StudyTwinState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    if twin.matched.is_some() {
        return None;
    }
    let count = demo::study_partners().len();
    match key.code {
        KeyCode::Char('y') => {
            twin.matched = Some(twin.partner_index % count);
            Some(Vec::new())
        }
        KeyCode::Char('n') => {
            twin.partner_index = (twin.partner_index + 1) % count;
            Some(Vec::new())
        }
        _ => None,
    }
}
