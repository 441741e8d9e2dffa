//! Top-level rendering: login screens, header, content, navigation bar.

use edutrackr_core::identity::Role;
use edutrackr_core::login::{CODE_LEN, FormField, LoginStep};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Stylize;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::state::AppState;
use crate::views::{self, View};
use crate::{screens, views::APP_TITLE};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

fn spinner(state: &AppState) -> &'static str {
    SPINNER[state.spinner_frame % SPINNER.len()]
}

/// Renders the whole frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    if state.session.is_none() {
        render_login(state, frame);
    } else {
        render_portal(state, frame);
    }
}

// ============================================================================
// Login
// ============================================================================

fn render_login(state: &AppState, frame: &mut Frame) {
    let mut lines = vec![
        Line::from(APP_TITLE.bold().blue()),
        Line::from("Your academic progress, simplified.".dim()),
        Line::default(),
    ];

    match state.login.step() {
        LoginStep::RoleSelection => role_selection_lines(state, &mut lines),
        LoginStep::DetailsForm { role } => details_lines(state, role, &mut lines),
        LoginStep::CodeVerification { .. } => code_lines(state, &mut lines),
    }

    if let Some(error) = &state.login_ui.error {
        lines.push(Line::default());
        lines.push(Line::from(error.clone().red()));
    }

    let block = Block::new().borders(Borders::ALL).title(" Sign in ");
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

fn role_selection_lines(state: &AppState, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from("SELECT YOUR ROLE".dim()));
    lines.push(Line::default());
    let blurbs = [
        "Access schedule & tasks",
        "Monitor progress",
        "Manage records",
    ];
    for (i, role) in Role::all().iter().enumerate() {
        let marker = if i == state.login_ui.role_cursor {
            "> "
        } else {
            "  "
        };
        let name = if i == state.login_ui.role_cursor {
            format!("{:<10}", role.label()).bold().blue()
        } else {
            format!("{:<10}", role.label()).into()
        };
        lines.push(Line::from(vec![marker.into(), name, blurbs[i].dim()]));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        "up/down".bold(),
        " choose    ".into(),
        "enter".bold(),
        " continue    ".into(),
        "q".bold(),
        " quit".into(),
    ]));
}

fn details_lines(state: &AppState, role: Role, lines: &mut Vec<Line<'static>>) {
    let heading = match role {
        Role::Student => "Student Login",
        Role::Parent => "Parent Login",
        Role::College => "Staff Login",
    };
    lines.push(Line::from(heading.bold()));
    lines.push(Line::default());

    let fields = FormField::required_for(role);
    for (i, field) in fields.iter().enumerate() {
        let focused = i == state.login_ui.field_cursor.min(fields.len() - 1);
        let marker = if focused { "> " } else { "  " };
        let value = state.login.form().get(*field);
        let shown = if field.is_secret() {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let mut spans = vec![
            marker.into(),
            format!("{:<14}", field.label(role)).dim(),
            shown.into(),
        ];
        if focused {
            spans.push("▏".blue());
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    if state.login.busy() {
        lines.push(Line::from(format!("{} Verifying...", spinner(state)).dim()));
    } else {
        lines.push(Line::from(vec![
            "tab".bold(),
            " next field    ".into(),
            "enter".bold(),
            " Send OTP    ".into(),
            "esc".bold(),
            " back to roles".into(),
        ]));
    }
}

fn code_lines(state: &AppState, lines: &mut Vec<Line<'static>>) {
    lines.push(Line::from("Enter verification code".bold()));
    lines.push(Line::from(
        "We've sent a 4-digit code to your registered number ending in **89".dim(),
    ));
    lines.push(Line::default());

    let mut slots: Vec<Span<'static>> = Vec::with_capacity(CODE_LEN);
    for (i, slot) in state.login.code().iter().enumerate() {
        let shown = match slot {
            Some(c) => format!("[{c}]"),
            None => "[ ]".to_string(),
        };
        if i == state.login_ui.code_cursor {
            slots.push(shown.bold().blue());
        } else {
            slots.push(shown.into());
        }
        slots.push(" ".into());
    }
    lines.push(Line::from(slots));

    lines.push(Line::default());
    if state.login.busy() {
        lines.push(Line::from(
            format!("{} Authenticating...", spinner(state)).dim(),
        ));
    } else {
        lines.push(Line::from(vec![
            "enter".bold(),
            " Verify & Login    ".into(),
            "esc".bold(),
            " back to details".into(),
        ]));
    }
}

// ============================================================================
// Authenticated portal
// ============================================================================

fn render_portal(state: &AppState, frame: &mut Frame) {
    let Some(identity) = &state.session else {
        return;
    };

    let [header_area, content_area, nav_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    // Header: page title, greeting on the dashboard, level for students.
    let mut header = vec![views::title_for(state.view).bold()];
    if state.view == View::Dashboard {
        header.push(format!("  Welcome, {}", identity.first_name()).dim());
    }
    if let Some(level) = identity.level() {
        header.push(format!("   Lvl {level}").yellow());
    }
    frame.render_widget(
        Paragraph::new(Line::from(header)).block(Block::new().borders(Borders::BOTTOM)),
        header_area,
    );

    let screen = views::dispatch(state.view, identity.role);
    let content = Paragraph::new(Text::from(screens::content_for(state, screen)))
        .wrap(Wrap { trim: false });
    frame.render_widget(content, content_area);

    // Bottom navigation from the role's affordance set.
    let mut nav: Vec<Span<'static>> = Vec::new();
    for (i, (view, label)) in views::nav_items(identity.role).iter().enumerate() {
        let slot = format!("{} {label}", i + 1);
        if *view == state.view {
            nav.push(slot.bold().blue());
        } else {
            nav.push(slot.into());
        }
        nav.push("   ".into());
    }
    nav.push("p profile   q quit".dim());
    frame.render_widget(
        Paragraph::new(Line::from(nav)).block(Block::new().borders(Borders::TOP)),
        nav_area,
    );
}
