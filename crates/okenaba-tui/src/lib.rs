//! Okenaba TUI.
//!
//! Ratatui front end for the onboarding wizard: one screen with the step
//! form, the live preview and the step indicator.

pub mod app;
pub mod clipboard;
pub mod input;
pub mod ports;
pub mod ui;
pub mod widgets;

pub use app::{App, InputResult};

use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use okenaba_core::config::WizardConfig;
use okenaba_workflow::SystemClock;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the interactive wizard until the user finishes or leaves.
pub fn run(config: &WizardConfig) -> Result<InputResult> {
    use std::io::IsTerminal;

    if !io::stdout().is_terminal() {
        anyhow::bail!(
            "No TTY detected. The wizard requires an interactive terminal.\n\
             Use `okenaba check` or `okenaba render` for headless runs."
        );
    }

    let mut app = App::new(config, SystemClock)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<SystemClock>,
) -> Result<InputResult> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        app.on_frame_rendered();

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let result = match event::read()? {
            Event::Key(key) => app.handle_input(key),
            Event::Paste(text) => app.handle_paste(&text),
            _ => InputResult::Continue,
        };
        if result != InputResult::Continue {
            log::info!("Wizard finished: {:?}", result);
            return Ok(result);
        }
    }
}
