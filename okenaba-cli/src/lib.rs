pub mod commands;
pub mod headless;

use anyhow::Result;
use clap::Parser;
use okenaba_core::cli::{Cli, Command, ThemeAction};
use okenaba_core::config::{load_config, WizardConfig};
use okenaba_core::theme::ThemeStore;
use okenaba_tui::InputResult;
use std::io;
use std::path::PathBuf;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    okenaba_core::logging::init_with(log_file_for(&cli, &config));

    let mut out = io::stdout();

    match &cli.command {
        // No subcommand = launch the interactive wizard (default)
        None => {
            log::info!("🧭 Launching the {} wizard...", config.variant);
            match okenaba_tui::run(&config)? {
                InputResult::Complete => log::info!("✅ Onboarding complete"),
                InputResult::Left { target, discarded } => {
                    log::info!("👋 Left onboarding for {} (draft discarded: {})", target, discarded);
                }
                InputResult::Quit | InputResult::Continue => {}
            }
        }
        Some(Command::Check { answers }) => {
            log::info!("🔍 Checking {}", answers.display());
            let schema = config.schema()?;
            let answers = commands::load_answers(answers)?;
            commands::check(&schema, &answers, &mut out)?;
        }
        Some(Command::Render { answers, image }) => {
            let schema = config.schema()?;
            let answers = commands::load_answers(answers)?;
            commands::render(&schema, answers, image.as_deref(), &mut out)?;
        }
        Some(Command::Walk { answers }) => {
            let answers = commands::load_answers(answers)?;
            commands::walk(&config, &answers, &mut out)?;
        }
        Some(Command::Steps) => {
            commands::steps(&config.schema()?, &mut out)?;
        }
        Some(Command::Theme { action }) => {
            let store = ThemeStore::new(&config.theme_path);
            match action {
                ThemeAction::Show { prefers_dark } => {
                    commands::theme_show(&store, *prefers_dark, &mut out)?;
                }
                ThemeAction::Toggle { prefers_dark } => {
                    commands::theme_toggle(&store, *prefers_dark, &mut out)?;
                }
            }
        }
    }
    Ok(())
}

/// Config file first, then command-line overrides.
pub fn resolve_config(cli: &Cli) -> Result<WizardConfig> {
    let mut config = load_config(cli.config.as_deref())?;
    if let Some(variant) = cli.variant {
        config.variant = variant;
    }
    Ok(config)
}

/// The TUI owns the terminal, so it logs to a file unless told otherwise.
pub fn log_file_for(cli: &Cli, config: &WizardConfig) -> Option<PathBuf> {
    match (&cli.log_file, &cli.command) {
        (Some(path), _) => Some(path.clone()),
        (None, None) => Some(config.log_path()),
        (None, Some(_)) => None,
    }
}
