//! The three role dashboards.

use edutrackr_core::demo;
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::state::AppState;

/// A coarse text bar, `width` cells wide, `percent` filled.
fn bar(percent: u32, width: usize) -> String {
    let filled = (percent as usize * width) / 100;
    let mut out = String::with_capacity(width);
    for i in 0..width {
        out.push(if i < filled { '█' } else { '░' });
    }
    out
}

pub fn student(state: &AppState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(identity) = &state.session
        && let Some((xp, max_xp)) = identity.xp_progress()
    {
        let level = identity.level().unwrap_or_default();
        lines.push(Line::from(vec![
            format!("Lvl {level} ").yellow().bold(),
            bar(xp * 100 / max_xp.max(1), 16).yellow(),
            format!(" {xp}/{max_xp} XP").dim(),
        ]));
        lines.push(Line::default());
    }

    lines.push(Line::from("Attendance".bold()));
    lines.push(Line::from(vec![
        bar(demo::overall_attendance(), 20).blue(),
        format!(" {}% present", demo::overall_attendance()).into(),
    ]));
    lines.push(Line::default());

    lines.push(Line::from("Performance".bold()));
    for record in demo::marks_series() {
        lines.push(Line::from(vec![
            format!("{:<8}", record.exam).dim(),
            bar(record.marks, 20).green(),
            format!(" {}", record.marks).into(),
        ]));
    }
    lines.push(Line::default());

    lines.push(Line::from("Upcoming Exams".bold()));
    for exam in demo::upcoming_exams() {
        lines.push(Line::from(vec![
            format!("{:<18}", exam.name).into(),
            format!("{:<14}", exam.subject).dim(),
            exam.date_label().blue(),
            format!("  in {} days", exam.days_away).dim(),
        ]));
    }

    lines
}

pub fn parent() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from("Alex Johnson".bold()),
        Line::from("Class 12-A • Roll No. 45".dim()),
        Line::default(),
        Line::from(vec![
            "85%".bold().blue(),
            " Attendance    ".into(),
            "A".bold().green(),
            " Avg Grade    ".into(),
            "0".bold(),
            " Remarks".into(),
        ]),
        Line::default(),
        Line::from("Recent Activity".bold()),
        Line::from(vec![
            "! ".yellow(),
            "Absent".bold(),
            " for Chemistry Class".into(),
            "  Today, 09:30 AM".dim(),
        ]),
        Line::from(vec![
            "^ ".green(),
            "Scored ".into(),
            "92/100".bold(),
            " in Math Test".into(),
            "  Yesterday".dim(),
        ]),
        Line::default(),
        Line::from("Upcoming Exams".bold()),
    ];
    for exam in demo::upcoming_exams() {
        lines.push(Line::from(vec![
            format!("{:<18}", exam.name).into(),
            exam.date_label().blue(),
        ]));
    }
    lines
}

pub fn college() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            "1,240".bold().blue(),
            " Students    ".into(),
            "86".bold().green(),
            " Staff".into(),
        ]),
        Line::default(),
        Line::from("Quick Actions".bold()),
        Line::from("Mark attendance, upload marks, publish notices and approve"),
        Line::from("leave requests from the Manage tab."),
        Line::default(),
        Line::from("Pending Leave Requests".bold()),
    ];
    for request in demo::leave_requests() {
        lines.push(Line::from(vec![
            format!("{:<16}", request.student).into(),
            format!("{:<18}", request.reason).dim(),
            format!("{} ({})", request.days, request.dates).into(),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from("Latest Notices".bold()));
    for notice in demo::notices() {
        lines.push(Line::from(vec![
            format!("{:<26}", notice.title).into(),
            notice.date.dim(),
        ]));
    }
    lines
}
