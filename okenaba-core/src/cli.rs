//! CLI argument parsing for Okenaba
//!
//! Makes the interactive wizard the default entry point when no subcommand is provided.

use crate::schema::Variant;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "okenaba")]
#[command(about = "🧭 Okenaba - build your site step by step")]
#[command(long_about = "🧭 Okenaba - build your site step by step\n\n\
    Run without arguments to launch the interactive onboarding wizard.\n\
    Or use subcommands to check and preview answer files headlessly.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Wizard variant (overrides the config file)
    #[arg(long, value_enum, global = true)]
    pub variant: Option<Variant>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// 🔍 Validate an answers file against every gating step
    Check {
        /// TOML file of `field_id = "value"` pairs
        #[arg(long)]
        answers: PathBuf,
    },

    /// 🖼️ Print the preview fragment for an answers file
    Render {
        #[arg(long)]
        answers: PathBuf,

        /// PNG or JPEG to use as the header image
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// 🧭 Drive the wizard headlessly with an answers file and print each transition
    Walk {
        #[arg(long)]
        answers: PathBuf,
    },

    /// 📋 List the steps and fields of the active schema
    Steps,

    /// 🎨 Show or toggle the stored theme preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the effective theme
    Show {
        /// Treat the system as preferring dark mode
        #[arg(long)]
        prefers_dark: bool,
    },
    /// Flip and persist the theme
    Toggle {
        #[arg(long)]
        prefers_dark: bool,
    },
}
