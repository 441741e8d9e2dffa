//! Screen content builders and per-screen key handlers.
//!
//! Every screen is a leaf collaborator: it renders from `AppState` (and
//! the demo data) and may consume keys, but holds no cross-cutting
//! state. The view router in [`crate::views`] decides which one runs.

pub mod college;
pub mod dashboards;
pub mod gamification;
pub mod messages;
pub mod smart_study;
pub mod student;
pub mod study_twin;
pub mod timetable;
pub mod wellness;

use crossterm::event::KeyEvent;
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::AppState;
use crate::views::Screen;

/// Builds the content lines for a screen.
pub fn content_for(state: &AppState, screen: Screen) -> Vec<Line<'static>> {
    match screen {
        Screen::StudentDashboard => dashboards::student(state),
        Screen::ParentDashboard => dashboards::parent(),
        Screen::CollegeDashboard => dashboards::college(),
        Screen::Timetable => timetable::content(state),
        Screen::Timer => student::timer(state),
        Screen::AiPlanner => student::planner(state),
        Screen::Assignments => student::assignments(),
        Screen::Messages => messages::content(state),
        Screen::StudyTwin => study_twin::content(state),
        Screen::StressManagement => wellness::content(state),
        Screen::SmartStudy => smart_study::content(state),
        Screen::Gamification => gamification::content(),
        Screen::LearningSwipe => student::learning_swipe(),
        Screen::AttendanceMarker => college::attendance(state),
        Screen::MarksUpload => college::marks_upload(),
        Screen::NoticeManager => college::notices(),
        Screen::LeaveApproval => college::leave_approval(state),
        Screen::Profile => profile(state),
        Screen::Placeholder => placeholder(),
    }
}

/// Offers a key to the screen. `Some` means consumed.
pub fn handle_key(state: &mut AppState, screen: Screen, key: KeyEvent) -> Option<Vec<UiEffect>> {
    match screen {
        Screen::Timer => student::handle_timer_key(&mut state.screens.timer, key),
        Screen::AiPlanner => student::handle_planner_key(&mut state.screens.planner, key),
        Screen::SmartStudy => smart_study::handle_key(&mut state.screens.smart, key),
        Screen::Messages => messages::handle_key(&mut state.screens.chat, key),
        Screen::Timetable => timetable::handle_key(&mut state.screens.timetable_day, key),
        Screen::StressManagement => wellness::handle_key(&mut state.screens.wellness, key),
        Screen::StudyTwin => study_twin::handle_key(&mut state.screens.twin, key),
        Screen::AttendanceMarker => {
            college::handle_attendance_key(&mut state.screens.attendance, key)
        }
        Screen::LeaveApproval => college::handle_leaves_key(&mut state.screens.leaves, key),
        _ => None,
    }
}

/// Whether the screen currently routes all keystrokes into a text input.
pub fn captures_input(state: &AppState, screen: Screen) -> bool {
    match screen {
        Screen::SmartStudy => state.screens.smart.editing,
        Screen::Messages => state.screens.chat.editing,
        _ => false,
    }
}

fn profile(state: &AppState) -> Vec<Line<'static>> {
    let Some(identity) = &state.session else {
        return Vec::new();
    };
    let mut lines = vec![
        Line::from(identity.name.clone().bold()),
        Line::from(format!("{} • ID: {}", identity.role, identity.id).dim()),
        Line::from(identity.avatar.clone().dim()),
        Line::default(),
    ];
    if let Some((xp, max_xp)) = identity.xp_progress() {
        lines.push(Line::from(format!(
            "Level {}  •  {xp} / {max_xp} XP",
            identity.level().unwrap_or_default()
        )));
        lines.push(Line::default());
    }
    lines.push(Line::from(vec!["l".bold().red(), " Log Out".into()]));
    lines
}

fn placeholder() -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from("Work in Progress".dim()),
        Line::default(),
        Line::from(vec!["1".bold(), " Go Back Home".into()]),
    ]
}
