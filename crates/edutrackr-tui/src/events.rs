//! UI event types.
//!
//! All inputs to the TUI — terminal events and async completions — are
//! converted to [`UiEvent`] before the reducer sees them.

use crossterm::event::Event as CrosstermEvent;
use edutrackr_core::study::{Flashcard, QuizQuestion, StudyPlanItem};

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (for the spinner and polling cadence).
    Tick,

    /// Terminal input event (key, resize, ...).
    Terminal(CrosstermEvent),

    /// The simulated verification dispatch finished; the login flow
    /// advances to code verification.
    VerificationDispatched,

    /// The simulated authentication finished; the login flow publishes
    /// the identity.
    Authenticated,

    /// One second of focus-timer time elapsed. Stale epochs are dropped.
    TimerElapsed { epoch: u64 },

    /// Study plan generation completed.
    PlanReady(Vec<StudyPlanItem>),

    /// Flashcard generation completed.
    CardsReady(Vec<Flashcard>),

    /// Quiz generation completed.
    QuizReady(Vec<QuizQuestion>),

    /// Tutor answer completed.
    TutorReply(String),

    /// Notes summarization completed.
    SummaryReady(String),
}
