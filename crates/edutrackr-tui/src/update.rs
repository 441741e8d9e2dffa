//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state,
//! event)` and executes the returned effects.

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};
use edutrackr_core::identity::Role;
use edutrackr_core::login::{CODE_LEN, CodeEntry, FormField, LoginStep};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::screens;
use crate::state::{AppState, TutorMessage};
use crate::views::{self, Screen, View};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns
/// effects for the runtime to execute.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            state.spinner_frame = state.spinner_frame.wrapping_add(1);
            Vec::new()
        }
        UiEvent::Terminal(CrosstermEvent::Key(key)) if key.kind != KeyEventKind::Release => {
            handle_key(state, key)
        }
        UiEvent::Terminal(_) => Vec::new(),
        UiEvent::VerificationDispatched => {
            if state.login.complete_details_submission() {
                state.login_ui.code_cursor = 0;
                state.login_ui.error = None;
            }
            Vec::new()
        }
        UiEvent::Authenticated => {
            if let Some(identity) = state.login.complete_code_submission() {
                tracing::info!(role = %identity.role, "identity published");
                state.publish_identity(identity);
            }
            Vec::new()
        }
        UiEvent::TimerElapsed { epoch } => {
            if state.screens.timer.on_elapsed(epoch) {
                vec![UiEffect::ScheduleTimerTick { epoch }]
            } else {
                Vec::new()
            }
        }
        UiEvent::PlanReady(plan) => {
            state.screens.planner.plan = Some(plan);
            state.screens.planner.loading = false;
            Vec::new()
        }
        UiEvent::CardsReady(cards) => {
            let smart = &mut state.screens.smart;
            smart.cards = cards;
            smart.card_index = 0;
            smart.flipped = false;
            smart.cards_loading = false;
            Vec::new()
        }
        UiEvent::QuizReady(quiz) => {
            let smart = &mut state.screens.smart;
            smart.answers = vec![None; quiz.len()];
            smart.quiz = quiz;
            smart.quiz_cursor = 0;
            smart.show_results = false;
            smart.quiz_loading = false;
            Vec::new()
        }
        UiEvent::TutorReply(text) => {
            let smart = &mut state.screens.smart;
            smart.tutor_log.push(TutorMessage {
                from_user: false,
                text,
            });
            smart.tutor_loading = false;
            Vec::new()
        }
        UiEvent::SummaryReady(summary) => {
            let smart = &mut state.screens.smart;
            smart.summary = Some(summary);
            smart.summary_loading = false;
            Vec::new()
        }
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if state.session.is_none() {
        handle_login_key(state, key)
    } else {
        handle_main_key(state, key)
    }
}

// ============================================================================
// Login flow keys
// ============================================================================

fn handle_login_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match state.login.step() {
        LoginStep::RoleSelection => handle_role_selection_key(state, key),
        LoginStep::DetailsForm { role } => handle_details_key(state, role, key),
        LoginStep::CodeVerification { .. } => handle_code_key(state, key),
    }
}

fn handle_role_selection_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let roles = Role::all();
    match key.code {
        KeyCode::Up => {
            state.login_ui.role_cursor = state.login_ui.role_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.login_ui.role_cursor + 1 < roles.len() {
                state.login_ui.role_cursor += 1;
            }
        }
        KeyCode::Enter => {
            let role = roles[state.login_ui.role_cursor.min(roles.len() - 1)];
            state.login.select_role(role);
            state.login_ui.field_cursor = 0;
            state.login_ui.error = None;
        }
        KeyCode::Esc | KeyCode::Char('q') => return vec![UiEffect::Quit],
        _ => {}
    }
    Vec::new()
}

fn handle_details_key(state: &mut AppState, role: Role, key: KeyEvent) -> Vec<UiEffect> {
    let fields = FormField::required_for(role);
    let cursor = state.login_ui.field_cursor.min(fields.len() - 1);
    match key.code {
        KeyCode::Esc => {
            state.login.return_to_role_selection();
            state.login_ui.reset();
        }
        KeyCode::Tab | KeyCode::Down => {
            state.login_ui.field_cursor = (cursor + 1) % fields.len();
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.login_ui.field_cursor = (cursor + fields.len() - 1) % fields.len();
        }
        KeyCode::Backspace => {
            state.login.form_mut().get_mut(fields[cursor]).pop();
        }
        KeyCode::Char(c) => {
            state.login.form_mut().get_mut(fields[cursor]).push(c);
        }
        KeyCode::Enter => match state.login.begin_details_submission() {
            Ok(()) => {
                state.login_ui.error = None;
                return vec![UiEffect::DispatchVerification];
            }
            Err(e) => state.login_ui.error = Some(e.to_string()),
        },
        _ => {}
    }
    Vec::new()
}

fn handle_code_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let cursor = state.login_ui.code_cursor.min(CODE_LEN - 1);
    match key.code {
        KeyCode::Esc => {
            state.login.return_to_details();
            state.login_ui.error = None;
        }
        KeyCode::Left => state.login_ui.code_cursor = cursor.saturating_sub(1),
        KeyCode::Right => {
            state.login_ui.code_cursor = (cursor + 1).min(CODE_LEN - 1);
        }
        KeyCode::Backspace => {
            // Clear the focused slot, or step back onto the previous one.
            if state.login.code()[cursor].is_some() {
                state.login.set_code_slot(cursor, "");
            } else if cursor > 0 {
                state.login.set_code_slot(cursor - 1, "");
                state.login_ui.code_cursor = cursor - 1;
            }
        }
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
            if let CodeEntry::Accepted {
                advance_to: Some(next),
            } = state.login.set_code_slot(cursor, &c.to_string())
            {
                state.login_ui.code_cursor = next;
            }
        }
        KeyCode::Enter => match state.login.begin_code_submission() {
            Ok(()) => {
                state.login_ui.error = None;
                return vec![UiEffect::Authenticate];
            }
            Err(e) => state.login_ui.error = Some(e.to_string()),
        },
        _ => {}
    }
    Vec::new()
}

// ============================================================================
// Authenticated keys
// ============================================================================

fn handle_main_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let Some(identity) = &state.session else {
        return Vec::new();
    };
    let role = identity.role;
    let screen = views::dispatch(state.view, role);

    // Text inputs swallow everything, including navigation digits.
    if screens::captures_input(state, screen) {
        return screens::handle_key(state, screen, key).unwrap_or_default();
    }

    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as u8 - b'1') as usize;
            if let Some((view, _)) = views::nav_items(role).get(index) {
                state.view = *view;
            }
            return Vec::new();
        }
        KeyCode::Char('q') => return vec![UiEffect::Quit],
        KeyCode::Char('p') => {
            state.view = View::Profile;
            return Vec::new();
        }
        KeyCode::Char('l') if screen == Screen::Profile => {
            state.logout();
            return Vec::new();
        }
        _ => {}
    }

    screens::handle_key(state, screen, key).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use edutrackr_core::config::Config;
    use edutrackr_core::identity::RoleExtras;

    fn press(state: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            state,
            UiEvent::Terminal(CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn type_str(state: &mut AppState, text: &str) {
        for c in text.chars() {
            press(state, KeyCode::Char(c));
        }
    }

    /// Drives the full student login end to end.
    fn login_as_student(state: &mut AppState) {
        // Role selection: Student is the first entry.
        press(state, KeyCode::Enter);
        assert_eq!(
            state.login.step(),
            LoginStep::DetailsForm { role: Role::Student }
        );

        type_str(state, "Alex Johnson");
        press(state, KeyCode::Tab);
        type_str(state, "STU-2023-089");
        press(state, KeyCode::Tab);
        type_str(state, "12-A");

        let effects = press(state, KeyCode::Enter);
        assert_eq!(effects, vec![UiEffect::DispatchVerification]);
        assert!(state.login.busy());

        update(state, UiEvent::VerificationDispatched);
        assert!(matches!(
            state.login.step(),
            LoginStep::CodeVerification { .. }
        ));

        // Focus advances after positions 0-2, stays on the last slot.
        for (digit, expected_cursor) in [('1', 1), ('2', 2), ('3', 3), ('4', 3)] {
            press(state, KeyCode::Char(digit));
            assert_eq!(state.login_ui.code_cursor, expected_cursor);
        }

        let effects = press(state, KeyCode::Enter);
        assert_eq!(effects, vec![UiEffect::Authenticate]);
        update(state, UiEvent::Authenticated);
    }

    #[test]
    fn student_login_publishes_identity_and_resets_flow() {
        let mut state = AppState::new(Config::default());
        login_as_student(&mut state);

        let identity = state.session.as_ref().unwrap();
        assert_eq!(identity.role, Role::Student);
        assert_eq!(identity.name, "Alex Johnson");
        assert_eq!(identity.id, "STU-2023-089");
        assert!(matches!(identity.extras, RoleExtras::Student { .. }));
        assert_eq!(state.view, View::Dashboard);
        assert_eq!(state.login.step(), LoginStep::RoleSelection);
    }

    #[test]
    fn incomplete_code_is_rejected() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Enter);
        type_str(&mut state, "Alex");
        press(&mut state, KeyCode::Tab);
        type_str(&mut state, "STU-1");
        press(&mut state, KeyCode::Tab);
        type_str(&mut state, "12-A");
        press(&mut state, KeyCode::Enter);
        update(&mut state, UiEvent::VerificationDispatched);

        type_str(&mut state, "12");
        let effects = press(&mut state, KeyCode::Enter);
        assert!(effects.is_empty());
        assert!(state.session.is_none());
        assert!(state.login_ui.error.is_some());
    }

    #[test]
    fn duplicate_details_submission_is_inert_while_busy() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Down);
        press(&mut state, KeyCode::Enter); // Parent
        type_str(&mut state, "Mrs. Johnson");
        press(&mut state, KeyCode::Tab);
        type_str(&mut state, "+91 98765 43210");

        let effects = press(&mut state, KeyCode::Enter);
        assert_eq!(effects, vec![UiEffect::DispatchVerification]);
        // Still pending: a second enter must not dispatch again.
        let effects = press(&mut state, KeyCode::Enter);
        assert!(effects.is_empty());
    }

    #[test]
    fn missing_fields_keep_the_form_on_screen() {
        let mut state = AppState::new(Config::default());
        press(&mut state, KeyCode::Enter);
        let effects = press(&mut state, KeyCode::Enter);
        assert!(effects.is_empty());
        assert!(matches!(state.login.step(), LoginStep::DetailsForm { .. }));
        assert_eq!(
            state.login_ui.error.as_deref(),
            Some("Student Name is required")
        );
    }

    #[test]
    fn logout_from_profile_resets_everything() {
        let mut state = AppState::new(Config::default());
        login_as_student(&mut state);

        press(&mut state, KeyCode::Char('p'));
        assert_eq!(state.view, View::Profile);
        press(&mut state, KeyCode::Char('l'));

        assert!(state.session.is_none());
        assert_eq!(state.view, View::Dashboard);
        assert_eq!(state.login.step(), LoginStep::RoleSelection);
    }

    #[test]
    fn digit_keys_navigate_the_role_nav_set() {
        let mut state = AppState::new(Config::default());
        login_as_student(&mut state);

        press(&mut state, KeyCode::Char('3'));
        assert_eq!(state.view, View::SmartStudy);
        press(&mut state, KeyCode::Char('5'));
        assert_eq!(state.view, View::StressManagement);
        // Out-of-range slots do nothing.
        press(&mut state, KeyCode::Char('9'));
        assert_eq!(state.view, View::StressManagement);
        press(&mut state, KeyCode::Char('1'));
        assert_eq!(state.view, View::Dashboard);
    }

    #[test]
    fn timer_tick_loop_stops_when_paused() {
        let mut state = AppState::new(Config::default());
        login_as_student(&mut state);
        state.view = View::Timer;

        let effects = press(&mut state, KeyCode::Char(' '));
        let epoch = state.screens.timer.epoch;
        assert_eq!(effects, vec![UiEffect::ScheduleTimerTick { epoch }]);

        let effects = update(&mut state, UiEvent::TimerElapsed { epoch });
        assert_eq!(effects, vec![UiEffect::ScheduleTimerTick { epoch }]);

        press(&mut state, KeyCode::Char(' ')); // pause
        let effects = update(&mut state, UiEvent::TimerElapsed { epoch });
        assert!(effects.is_empty());
    }

    #[test]
    fn study_results_land_in_screen_state() {
        let mut state = AppState::new(Config::default());
        login_as_student(&mut state);

        state.screens.smart.cards_loading = true;
        update(
            &mut state,
            UiEvent::CardsReady(edutrackr_core::study::service::fallback_flashcards()),
        );
        assert_eq!(state.screens.smart.cards.len(), 2);
        assert!(!state.screens.smart.cards_loading);

        state.screens.smart.quiz_loading = true;
        update(
            &mut state,
            UiEvent::QuizReady(edutrackr_core::study::service::fallback_quiz()),
        );
        assert_eq!(state.screens.smart.answers, vec![None; 3]);

        state.screens.smart.tutor_loading = true;
        update(&mut state, UiEvent::TutorReply("Osmosis is...".to_string()));
        let last = state.screens.smart.tutor_log.last().unwrap();
        assert!(!last.from_user);
        assert!(!state.screens.smart.tutor_loading);
    }

    #[test]
    fn quit_is_reachable_from_both_sides_of_login() {
        let mut state = AppState::new(Config::default());
        assert_eq!(press(&mut state, KeyCode::Char('q')), vec![UiEffect::Quit]);

        let mut state = AppState::new(Config::default());
        login_as_student(&mut state);
        assert_eq!(press(&mut state, KeyCode::Char('q')), vec![UiEffect::Quit]);
    }
}
