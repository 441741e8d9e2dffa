//! Leaderboard and badges.

use edutrackr_core::demo::{self, Trend};
use ratatui::style::Stylize;
use ratatui::text::Line;

pub fn content() -> Vec<Line<'static>> {
    let mut lines = vec![Line::from("Leaderboard".bold())];
    for entry in demo::leaderboard() {
        let trend = match entry.trend {
            Trend::Up => "▲".green(),
            Trend::Down => "▼".red(),
            Trend::Same => "-".dim(),
        };
        let name = if entry.name == "Alex Johnson" {
            format!("{:<16}", entry.name).bold().blue()
        } else {
            format!("{:<16}", entry.name).into()
        };
        lines.push(Line::from(vec![
            format!("#{:<3}", entry.rank).bold(),
            name,
            format!("{:>5} XP ", entry.xp).into(),
            trend,
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from("Badges".bold()));
    for badge in demo::badges() {
        let name = if badge.unlocked {
            format!("{} {:<14}", badge.icon, badge.name).into()
        } else {
            format!("🔒 {:<14}", badge.name).dim()
        };
        lines.push(Line::from(vec![name, badge.description.dim()]));
    }
    lines
}
