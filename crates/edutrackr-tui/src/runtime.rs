//! TUI runtime — owns the terminal, runs the event loop, executes
//! effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! Async completions use an inbox pattern: spawned tasks send `UiEvent`s
//! to `inbox_tx`, and the runtime drains `inbox_rx` every frame.

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use edutrackr_core::config::Config;
use edutrackr_core::study::StudyService;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick cadence: fast enough for the spinner, slow enough to idle.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Delay before the mock notes summary appears.
const SUMMARY_DELAY: Duration = Duration::from_millis(1500);

/// Full-screen TUI runtime.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    service: Arc<StudyService>,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime. Must run inside a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: Config) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let service = Arc::new(StudyService::from_config(&config));
        let state = AppState::new(config);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            service,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until quit, restoring the terminal on
    /// the way out.
    ///
    /// # Errors
    /// Returns an error if polling or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let result = self.event_loop();
        let _ = terminal::restore_terminal();
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            for event in self.collect_events()? {
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, emitting a Tick
    /// at the fixed cadence.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block on terminal input until the next tick is due, unless we
        // already have events to process.
        let time_until_tick = TICK_INTERVAL.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= TICK_INTERVAL {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::DispatchVerification => {
                let delay = self.state.config.login.dispatch_delay();
                self.spawn(async move {
                    tokio::time::sleep(delay).await;
                    UiEvent::VerificationDispatched
                });
            }
            UiEffect::Authenticate => {
                let delay = self.state.config.login.auth_delay();
                self.spawn(async move {
                    tokio::time::sleep(delay).await;
                    UiEvent::Authenticated
                });
            }
            UiEffect::ScheduleTimerTick { epoch } => {
                self.spawn(async move {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    UiEvent::TimerElapsed { epoch }
                });
            }
            UiEffect::GeneratePlan { subjects, hours } => {
                let service = Arc::clone(&self.service);
                self.spawn(async move {
                    UiEvent::PlanReady(service.study_plan(&subjects, hours).await)
                });
            }
            UiEffect::GenerateFlashcards { topic, count } => {
                let service = Arc::clone(&self.service);
                self.spawn(async move {
                    UiEvent::CardsReady(service.flashcards(&topic, count).await)
                });
            }
            UiEffect::GenerateQuiz { text } => {
                let service = Arc::clone(&self.service);
                self.spawn(
                    async move { UiEvent::QuizReady(service.quiz_from_text(&text).await) },
                );
            }
            UiEffect::AskTutor { question, subject } => {
                let service = Arc::clone(&self.service);
                self.spawn(async move {
                    UiEvent::TutorReply(service.ask_tutor(&question, &subject).await)
                });
            }
            UiEffect::SummarizeNotes { text } => {
                self.spawn(async move {
                    tokio::time::sleep(SUMMARY_DELAY).await;
                    UiEvent::SummaryReady(mock_summary(&text))
                });
            }
        }
    }

    /// Spawns an async effect whose result event lands in the inbox.
    fn spawn<F>(&self, f: F)
    where
        F: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f.await);
        });
    }
}

/// The demo notes summarizer: a fixed re-arrangement of the input.
fn mock_summary(text: &str) -> String {
    let head: String = text.chars().take(100).collect();
    format!(
        "• {head}...\n\n• Key Point 1: The input text was analyzed.\n\
         • Key Point 2: Structure was identified.\n\
         • Summary: This is an AI-generated summary of your raw notes."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_summary_quotes_the_first_hundred_chars() {
        let text = "a".repeat(300);
        let summary = mock_summary(&text);
        assert!(summary.starts_with(&format!("• {}...", "a".repeat(100))));
        assert!(summary.contains("Key Point 2"));
    }
}
