//! College staff screens: attendance marking, marks upload, notice
//! management, leave approval.

use crossterm::event::{KeyCode, KeyEvent};
use edutrackr_core::demo;
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::{AppState, AttendanceState, LeaveApprovalState};

pub fn attendance(state: &AppState) -> Vec<Line<'static>> {
    let attendance = &state.screens.attendance;
    let roster = demo::class_roster();

    let mut lines = vec![
        Line::from("Mark Attendance — Class 12-A".bold()),
        Line::default(),
    ];
    for (i, student) in roster.iter().enumerate() {
        let cursor = if i == attendance.cursor { "> " } else { "  " };
        let mark = if attendance.present.get(i).copied().unwrap_or(true) {
            "present".green()
        } else {
            "absent ".red()
        };
        lines.push(Line::from(vec![
            cursor.into(),
            format!("{:<4}", student.roll).dim(),
            format!("{:<16}", student.name).into(),
            mark,
        ]));
    }
    lines.push(Line::default());
    if attendance.submitted {
        let present = attendance.present.iter().filter(|p| **p).count();
        lines.push(Line::from(
            format!("Submitted: {present}/{} present", roster.len()).green(),
        ));
    } else {
        lines.push(Line::from(vec![
            "up/down".bold(),
            " select    ".into(),
            "space".bold(),
            " toggle    ".into(),
            "enter".bold(),
            " submit".into(),
        ]));
    }
    lines
}

pub fn handle_attendance_key(
    attendance: &mut AttendanceState,
    key: KeyEvent,
) -> Option<Vec<UiEffect>> {
    match key.code {
        KeyCode::Up => {
            attendance.cursor = attendance.cursor.saturating_sub(1);
            Some(Vec::new())
        }
        KeyCode::Down => {
            if attendance.cursor + 1 < attendance.present.len() {
                attendance.cursor += 1;
            }
            Some(Vec::new())
        }
        KeyCode::Char(' ') if !attendance.submitted => {
            if let Some(mark) = attendance.present.get_mut(attendance.cursor) {
                *mark = !*mark;
            }
            Some(Vec::new())
        }
        KeyCode::Enter if !attendance.submitted => {
            attendance.submitted = true;
            Some(Vec::new())
        }
        _ => None,
    }
}

pub fn marks_upload() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Upload Marks".bold()),
        Line::from(vec![
            "Exam: ".dim(),
            "Mid-Term".into(),
            "    Subject: ".dim(),
            "Physics".into(),
        ]),
        Line::default(),
    ];
    for (student, mark) in demo::class_roster().iter().zip([85u32, 78, 91, 66]) {
        lines.push(Line::from(vec![
            format!("{:<4}", student.roll).dim(),
            format!("{:<16}", student.name).into(),
            format!("{mark}/100").bold(),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from("Marks entry is read-only in the demo.".dim()));
    lines
}

pub fn notices() -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("Published Notices".bold()), Line::default()];
    for notice in demo::notices() {
        lines.push(Line::from(vec![
            "● ".green(),
            format!("{:<26}", notice.title).into(),
            notice.date.dim(),
        ]));
    }
    lines
}

pub fn leave_approval(state: &AppState) -> Vec<Line<'static>> {
    let leaves = &state.screens.leaves;
    let requests = demo::leave_requests();

    let mut lines = vec![Line::from("Leave Requests".bold()), Line::default()];
    for (i, request) in requests.iter().enumerate() {
        let cursor = if i == leaves.cursor { "> " } else { "  " };
        let status = match leaves.decisions.get(i).copied().flatten() {
            Some(true) => "Approved".green(),
            Some(false) => "Rejected".red(),
            None => request.status.label().yellow(),
        };
        lines.push(Line::from(vec![
            cursor.into(),
            format!("{:<16}", request.student).into(),
            format!("{:<18}", request.reason).dim(),
            format!("{:<6} {:<10}", request.days, request.dates).into(),
            status,
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        "up/down".bold(),
        " select    ".into(),
        "a".bold().green(),
        " approve    ".into(),
        "x".bold().red(),
        " reject".into(),
    ]));
    lines
}

pub fn handle_leaves_key(leaves: &mut LeaveApprovalState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    match key.code {
        KeyCode::Up => {
            leaves.cursor = leaves.cursor.saturating_sub(1);
            Some(Vec::new())
        }
        KeyCode::Down => {
            if leaves.cursor + 1 < leaves.decisions.len() {
                leaves.cursor += 1;
            }
            Some(Vec::new())
        }
        KeyCode::Char('a') => {
            if let Some(slot) = leaves.decisions.get_mut(leaves.cursor) {
                *slot = Some(true);
            }
            Some(Vec::new())
        }
        KeyCode::Char('x') => {
            if let Some(slot) = leaves.decisions.get_mut(leaves.cursor) {
                *slot = Some(false);
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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn attendance_toggle_and_submit() {
        let mut state = crate::state::ScreensState::default().attendance;
        assert!(state.present.iter().all(|p| *p));
        handle_attendance_key(&mut state, key(KeyCode::Char(' ')));
        assert!(!state.present[0]);
        handle_attendance_key(&mut state, key(KeyCode::Enter));
        assert!(state.submitted);
        // Submitted roster is frozen.
        handle_attendance_key(&mut state, key(KeyCode::Char(' ')));
        assert!(!state.present[0]);
    }

    #[test]
    fn leave_decisions_follow_the_cursor() {
        let mut state = crate::state::ScreensState::default().leaves;
        handle_leaves_key(&mut state, key(KeyCode::Down));
        handle_leaves_key(&mut state, key(KeyCode::Char('a')));
        assert_eq!(state.decisions[1], Some(true));
        handle_leaves_key(&mut state, key(KeyCode::Char('x')));
        assert_eq!(state.decisions[1], Some(false));
        assert_eq!(state.decisions[0], None);
    }
}
