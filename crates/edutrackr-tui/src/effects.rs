//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime
//! executes. They represent I/O and task spawning only; the reducer
//! never performs I/O or spawns tasks directly.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Run the simulated verification dispatch for the details form.
    /// Completes as [`crate::events::UiEvent::VerificationDispatched`].
    DispatchVerification,

    /// Run the simulated authentication for the code submission.
    /// Completes as [`crate::events::UiEvent::Authenticated`].
    Authenticate,

    /// Deliver a focus-timer second after a one-second delay.
    ScheduleTimerTick { epoch: u64 },

    /// Generate a study plan via the study service.
    GeneratePlan { subjects: Vec<String>, hours: u32 },

    /// Generate flashcards for a topic.
    GenerateFlashcards { topic: String, count: usize },

    /// Generate a quiz from summarized notes.
    GenerateQuiz { text: String },

    /// Ask the tutor a free-form question.
    AskTutor { question: String, subject: String },

    /// Produce the mock notes summary after a short delay.
    SummarizeNotes { text: String },
}
