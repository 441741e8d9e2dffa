//! Interactive portal (the default command).

use std::io::IsTerminal;

use anyhow::Result;
use edutrackr_core::config::Config;

pub async fn run(config: Config) -> Result<()> {
    // The portal requires a terminal to render.
    if !std::io::stdout().is_terminal() {
        anyhow::bail!(
            "The portal requires a terminal.\n\
             Use `edutrackr plan`, `flashcards`, `quiz` or `tutor` for non-interactive use."
        );
    }

    edutrackr_tui::run_portal(config).await
}
