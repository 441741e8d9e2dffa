//! Application state composition.
//!
//! `AppState` owns everything: the session (or none), the current view,
//! the login flow, and per-screen leaf state. Only the reducer in
//! [`crate::update`] mutates it.

use edutrackr_core::config::Config;
use edutrackr_core::demo;
use edutrackr_core::identity::Identity;
use edutrackr_core::login::LoginFlow;
use edutrackr_core::study::{Flashcard, QuizQuestion, StudyPlanItem};

use crate::views::View;

/// Focus timer durations in seconds.
pub const FOCUS_SECS: u32 = 25 * 60;
pub const BREAK_SECS: u32 = 5 * 60;

/// Combined application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    pub config: Config,
    /// The authenticated identity, or None while the login flow is shown.
    pub session: Option<Identity>,
    /// Currently selected view. Meaningful only while a session exists.
    pub view: View,
    /// Login flow state machine (core) and its input focus (UI).
    pub login: LoginFlow,
    pub login_ui: LoginUiState,
    /// Per-screen leaf state.
    pub screens: ScreensState,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            config,
            session: None,
            view: View::Dashboard,
            login: LoginFlow::new(),
            login_ui: LoginUiState::default(),
            screens: ScreensState::default(),
            spinner_frame: 0,
        }
    }

    /// Publishes a freshly authenticated identity.
    ///
    /// The view deterministically resets to the dashboard; the login flow
    /// has already reset itself for a future cycle.
    pub fn publish_identity(&mut self, identity: Identity) {
        self.session = Some(identity);
        self.view = View::Dashboard;
        self.login_ui.reset();
    }

    /// Clears the identity and returns to the login flow.
    pub fn logout(&mut self) {
        self.session = None;
        self.view = View::Dashboard;
        self.login.reset();
        self.login_ui.reset();
        self.screens = ScreensState::default();
    }
}

/// Input focus for the login screens. The flow itself lives in core;
/// this is only which control the cursor is on.
#[derive(Debug, Default)]
pub struct LoginUiState {
    /// Highlighted role on the role selection step.
    pub role_cursor: usize,
    /// Focused field index into the role's required field list.
    pub field_cursor: usize,
    /// Focused code slot.
    pub code_cursor: usize,
    /// Last rejected operation, shown inline.
    pub error: Option<String>,
}

impl LoginUiState {
    pub fn reset(&mut self) {
        *self = LoginUiState::default();
    }
}

/// Leaf state for every screen. None of it is cross-cutting: it is all
/// discarded on logout.
#[derive(Debug)]
pub struct ScreensState {
    pub timer: TimerState,
    pub planner: PlannerState,
    pub smart: SmartStudyState,
    pub chat: ChatState,
    pub timetable_day: usize,
    pub wellness: WellnessState,
    pub attendance: AttendanceState,
    pub leaves: LeaveApprovalState,
    pub twin: StudyTwinState,
}

impl Default for ScreensState {
    fn default() -> Self {
        Self {
            timer: TimerState::default(),
            planner: PlannerState::default(),
            smart: SmartStudyState::default(),
            chat: ChatState::seeded(),
            timetable_day: demo::today_day_index(),
            wellness: WellnessState::default(),
            attendance: AttendanceState::seeded(),
            leaves: LeaveApprovalState::seeded(),
            twin: StudyTwinState::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Focus,
    Break,
}

impl TimerMode {
    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Focus Mode",
            TimerMode::Break => "Break Time",
        }
    }

    fn full_duration(self) -> u32 {
        match self {
            TimerMode::Focus => FOCUS_SECS,
            TimerMode::Break => BREAK_SECS,
        }
    }
}

/// Pomodoro timer driven by an epoch-guarded one-second effect loop.
///
/// The epoch increments whenever the timer is (re)started or reset, so a
/// tick scheduled before a toggle cannot act on the new run.
#[derive(Debug)]
pub struct TimerState {
    pub mode: TimerMode,
    pub seconds_left: u32,
    pub active: bool,
    pub epoch: u64,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            mode: TimerMode::Focus,
            seconds_left: FOCUS_SECS,
            active: false,
            epoch: 0,
        }
    }
}

impl TimerState {
    /// Toggles the timer. Returns true when a new tick loop must start.
    pub fn toggle(&mut self) -> bool {
        self.active = !self.active;
        self.epoch += 1;
        self.active
    }

    /// Stops the timer and restores the current mode's full duration.
    pub fn reset(&mut self) {
        self.active = false;
        self.epoch += 1;
        self.seconds_left = self.mode.full_duration();
    }

    /// Applies one elapsed second. Returns true when another tick should
    /// be scheduled.
    pub fn on_elapsed(&mut self, epoch: u64) -> bool {
        if !self.active || epoch != self.epoch {
            return false;
        }
        self.seconds_left = self.seconds_left.saturating_sub(1);
        if self.seconds_left == 0 {
            // Session complete: stop and load the other mode.
            self.active = false;
            self.mode = match self.mode {
                TimerMode::Focus => TimerMode::Break,
                TimerMode::Break => TimerMode::Focus,
            };
            self.seconds_left = self.mode.full_duration();
            return false;
        }
        true
    }

    /// "25:00"-style display.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.seconds_left / 60, self.seconds_left % 60)
    }
}

#[derive(Debug, Default)]
pub struct PlannerState {
    pub plan: Option<Vec<StudyPlanItem>>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyTool {
    Flashcards,
    AiTutor,
    Notes,
}

impl StudyTool {
    pub fn label(self) -> &'static str {
        match self {
            StudyTool::Flashcards => "Flashcards",
            StudyTool::AiTutor => "AI Tutor",
            StudyTool::Notes => "Notes Gen",
        }
    }

    pub fn next(self) -> Self {
        match self {
            StudyTool::Flashcards => StudyTool::AiTutor,
            StudyTool::AiTutor => StudyTool::Notes,
            StudyTool::Notes => StudyTool::Flashcards,
        }
    }
}

#[derive(Debug)]
pub struct TutorMessage {
    pub from_user: bool,
    pub text: String,
}

/// Smart study tools: flashcards, tutor chat, notes/quiz.
#[derive(Debug)]
pub struct SmartStudyState {
    pub tool: StudyTool,
    /// Whether keystrokes go to the active tool's text input.
    pub editing: bool,

    pub topic: String,
    pub cards: Vec<Flashcard>,
    pub card_index: usize,
    pub flipped: bool,
    pub cards_loading: bool,

    pub tutor_input: String,
    pub tutor_log: Vec<TutorMessage>,
    pub tutor_loading: bool,

    pub notes: String,
    pub summary: Option<String>,
    pub summary_loading: bool,
    pub quiz: Vec<QuizQuestion>,
    pub quiz_loading: bool,
    pub answers: Vec<Option<usize>>,
    pub quiz_cursor: usize,
    pub show_results: bool,
}

impl Default for SmartStudyState {
    fn default() -> Self {
        Self {
            tool: StudyTool::Flashcards,
            editing: false,
            topic: String::new(),
            cards: Vec::new(),
            card_index: 0,
            flipped: false,
            cards_loading: false,
            tutor_input: String::new(),
            tutor_log: vec![TutorMessage {
                from_user: false,
                text: "Hi! I'm your AI Tutor. What subject or concept are you stuck on today?"
                    .to_string(),
            }],
            tutor_loading: false,
            notes: String::new(),
            summary: None,
            summary_loading: false,
            quiz: Vec::new(),
            quiz_loading: false,
            answers: Vec::new(),
            quiz_cursor: 0,
            show_results: false,
        }
    }
}

impl SmartStudyState {
    /// Number of correctly answered quiz questions.
    pub fn quiz_score(&self) -> usize {
        self.quiz
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| **a == Some(q.correct_answer))
            .count()
    }

    /// Clears notes, summary and quiz for a fresh run.
    pub fn reset_notes(&mut self) {
        self.notes.clear();
        self.summary = None;
        self.quiz.clear();
        self.answers.clear();
        self.quiz_cursor = 0;
        self.show_results = false;
    }
}

#[derive(Debug)]
pub struct ChatEntry {
    pub sender: String,
    pub body: String,
    pub time: String,
    pub is_me: bool,
}

/// Parent-teacher chat, seeded from demo data.
#[derive(Debug)]
pub struct ChatState {
    pub log: Vec<ChatEntry>,
    pub input: String,
    pub editing: bool,
}

impl ChatState {
    fn seeded() -> Self {
        let now = chrono::Local::now().format("%H:%M").to_string();
        let log = demo::parent_chat()
            .into_iter()
            .map(|seed| ChatEntry {
                sender: seed.sender.to_string(),
                body: seed.body.to_string(),
                time: now.clone(),
                is_me: seed.is_me,
            })
            .collect();
        Self {
            log,
            input: String::new(),
            editing: false,
        }
    }

    pub fn push_own(&mut self, body: String) {
        self.log.push(ChatEntry {
            sender: "Me".to_string(),
            body,
            time: chrono::Local::now().format("%H:%M").to_string(),
            is_me: true,
        });
    }
}

#[derive(Debug, Default)]
pub struct WellnessState {
    /// Selected mood index into [`demo::moods`].
    pub mood: Option<usize>,
    pub affirmation_index: usize,
}

/// Attendance marking roster, everyone present by default.
#[derive(Debug)]
pub struct AttendanceState {
    pub present: Vec<bool>,
    pub cursor: usize,
    pub submitted: bool,
}

impl AttendanceState {
    fn seeded() -> Self {
        Self {
            present: vec![true; demo::class_roster().len()],
            cursor: 0,
            submitted: false,
        }
    }
}

/// Pending leave decisions: None until approved (true) or rejected.
#[derive(Debug)]
pub struct LeaveApprovalState {
    pub decisions: Vec<Option<bool>>,
    pub cursor: usize,
}

impl LeaveApprovalState {
    fn seeded() -> Self {
        Self {
            decisions: vec![None; demo::leave_requests().len()],
            cursor: 0,
        }
    }
}

/// Study partner matching.
#[derive(Debug, Default)]
pub struct StudyTwinState {
    pub partner_index: usize,
    pub matched: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_counts_down_and_switches_mode() {
        let mut timer = TimerState {
            mode: TimerMode::Focus,
            seconds_left: 2,
            active: true,
            epoch: 3,
        };
        assert!(timer.on_elapsed(3));
        assert_eq!(timer.seconds_left, 1);
        // Final second: stop and load the break duration.
        assert!(!timer.on_elapsed(3));
        assert!(!timer.active);
        assert_eq!(timer.mode, TimerMode::Break);
        assert_eq!(timer.seconds_left, BREAK_SECS);
    }

    #[test]
    fn stale_timer_epochs_are_ignored() {
        let mut timer = TimerState::default();
        timer.toggle();
        let old_epoch = timer.epoch - 1;
        let before = timer.seconds_left;
        assert!(!timer.on_elapsed(old_epoch));
        assert_eq!(timer.seconds_left, before);
    }

    #[test]
    fn timer_reset_restores_full_duration() {
        let mut timer = TimerState::default();
        timer.toggle();
        timer.seconds_left = 17;
        timer.reset();
        assert!(!timer.active);
        assert_eq!(timer.seconds_left, FOCUS_SECS);
        assert_eq!(timer.display(), "25:00");
    }

    #[test]
    fn quiz_score_counts_correct_answers() {
        let mut smart = SmartStudyState::default();
        smart.quiz = edutrackr_core::study::service::fallback_quiz();
        smart.answers = vec![Some(0), Some(3), None];
        assert_eq!(smart.quiz_score(), 1);
    }

    #[test]
    fn logout_discards_screen_state_and_resets_view() {
        let mut state = AppState::new(Config::default());
        state.publish_identity(edutrackr_core::identity::Identity::synthesize(
            edutrackr_core::identity::Role::Student,
            "Alex Johnson",
            "STU-2023-089",
        ));
        state.view = View::SmartStudy;
        state.screens.smart.topic = "Photosynthesis".to_string();

        state.logout();
        assert!(state.session.is_none());
        assert_eq!(state.view, View::Dashboard);
        assert!(state.screens.smart.topic.is_empty());
        assert_eq!(
            state.login.step(),
            edutrackr_core::login::LoginStep::RoleSelection
        );
    }
}
