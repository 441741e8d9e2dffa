//! Full-screen TUI for the EduTrackr portal.
//!
//! Elm-style architecture: [`state::AppState`] holds all state, the
//! reducer in [`update`] is the only place that mutates it, and the
//! [`runtime`] owns the terminal, executes [`effects::UiEffect`]s and
//! feeds completion [`events::UiEvent`]s back through an inbox channel.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;
pub mod views;

use anyhow::Result;
use edutrackr_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive portal until the user quits.
///
/// # Errors
/// Returns an error if the terminal cannot be set up or drawn to.
pub async fn run_portal(config: Config) -> Result<()> {
    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()
}
