//! Student features: focus timer, AI planner, assignments, daily
//! learning swipe.

use crossterm::event::{KeyCode, KeyEvent};
use edutrackr_core::demo;
use ratatui::style::Stylize;
use ratatui::text::Line;

use crate::effects::UiEffect;
use crate::state::{AppState, PlannerState, TimerMode, TimerState};

pub fn timer(state: &AppState) -> Vec<Line<'static>> {
    let timer = &state.screens.timer;
    let mode = match timer.mode {
        TimerMode::Focus => timer.mode.label().blue().bold(),
        TimerMode::Break => timer.mode.label().green().bold(),
    };

    vec![
        Line::default(),
        Line::from(mode),
        Line::from(timer.display().bold()),
        Line::default(),
        Line::from(if timer.active {
            "running".green()
        } else {
            "paused".dim()
        }),
        Line::default(),
        Line::from(vec![
            "space".bold(),
            " start/pause    ".into(),
            "r".bold(),
            " reset".into(),
        ]),
        Line::default(),
        Line::from("Today's Goal".bold()),
        Line::from(vec!["4h 30m".blue().bold(), " target duration".dim()]),
        Line::from(vec!["1h 15m".green().bold(), " completed (2 sessions)".dim()]),
    ]
}

pub fn handle_timer_key(timer: &mut TimerState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    match key.code {
        KeyCode::Char(' ') => {
            let effects = if timer.toggle() {
                vec![UiEffect::ScheduleTimerTick { epoch: timer.epoch }]
            } else {
                Vec::new()
            };
            Some(effects)
        }
        KeyCode::Char('r') => {
            timer.reset();
            Some(Vec::new())
        }
        _ => None,
    }
}

/// Subjects the demo planner always asks about.
const PLANNER_SUBJECTS: [&str; 3] = ["Mathematics", "Computer Science", "History"];
const PLANNER_HOURS: u32 = 3;

pub fn planner(state: &AppState) -> Vec<Line<'static>> {
    let planner = &state.screens.planner;
    let mut lines = vec![
        Line::from("AI Study Planner".bold()),
        Line::from("Let Gemini AI optimize your study schedule based on your"),
        Line::from("subjects and free time."),
        Line::default(),
    ];

    if planner.loading {
        lines.push(Line::from("Generating Plan...".dim()));
        return lines;
    }

    lines.push(Line::from(vec![
        "enter".bold(),
        " Generate Today's Plan".into(),
    ]));

    if let Some(plan) = &planner.plan {
        lines.push(Line::default());
        lines.push(Line::from("Your Optimized Schedule".bold()));
        for item in plan {
            lines.push(Line::from(vec![
                format!("{:<9}", item.time).bold(),
                format!("{:<5}", item.duration).dim(),
                format!("{:<18}", item.subject).into(),
                item.topic.clone().dim(),
            ]));
        }
        if plan.is_empty() {
            lines.push(Line::from("No plan came back. Try again.".dim()));
        }
    }

    lines
}

pub fn handle_planner_key(planner: &mut PlannerState, key: KeyEvent) -> Option<Vec<UiEffect>> {
    match key.code {
        KeyCode::Enter if !planner.loading => {
            planner.loading = true;
            Some(vec![UiEffect::GeneratePlan {
                subjects: PLANNER_SUBJECTS.iter().map(ToString::to_string).collect(),
                hours: PLANNER_HOURS,
            }])
        }
        _ => None,
    }
}

pub fn assignments() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for assignment in demo::assignments() {
        let marker = if assignment.completed {
            "[x]".green()
        } else {
            "[ ]".dim()
        };
        let title = if assignment.completed {
            assignment.title.crossed_out().dim()
        } else {
            assignment.title.bold()
        };
        lines.push(Line::from(vec![
            marker,
            " ".into(),
            title,
            format!("  {}", assignment.subject).dim(),
            format!("  due {}", assignment.due).red(),
        ]));
    }
    lines
}

pub fn learning_swipe() -> Vec<Line<'static>> {
    vec![
        Line::default(),
        Line::from("Daily Micro-Learning".bold()),
        Line::from("Swipe through bite-sized lessons tailored to your"),
        Line::from("curriculum."),
        Line::default(),
        Line::from("Coming to your daily feed soon.".dim()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn space_starts_the_tick_loop_once() {
        let mut timer = TimerState::default();
        let effects = handle_timer_key(&mut timer, key(KeyCode::Char(' '))).unwrap();
        assert_eq!(effects, vec![UiEffect::ScheduleTimerTick { epoch: timer.epoch }]);
        assert!(timer.active);

        // Pausing schedules nothing.
        let effects = handle_timer_key(&mut timer, key(KeyCode::Char(' '))).unwrap();
        assert!(effects.is_empty());
        assert!(!timer.active);
    }

    #[test]
    fn planner_enter_is_inert_while_loading() {
        let mut planner = PlannerState::default();
        let effects = handle_planner_key(&mut planner, key(KeyCode::Enter)).unwrap();
        assert_eq!(effects.len(), 1);
        assert!(planner.loading);
        assert!(handle_planner_key(&mut planner, key(KeyCode::Enter)).is_none());
    }
}
