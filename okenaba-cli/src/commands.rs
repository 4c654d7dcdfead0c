//! Headless subcommands.
//!
//! Each command writes its report to `out` so it can be checked in tests.

use crate::headless::HeadlessPorts;
use anyhow::{bail, Context, Result};
use log::info;
use okenaba_core::config::WizardConfig;
use okenaba_core::preview::render_snapshot;
use okenaba_core::schema::{FieldRule, WizardSchema};
use okenaba_core::snapshot::parse_answers_toml;
use okenaba_core::theme::{resolve_theme, Theme, ThemeStore};
use okenaba_core::upload::{accept_file, FileUpload};
use okenaba_core::validation::validate_all;
use okenaba_core::FormSnapshot;
use okenaba_workflow::{ManualClock, StepController, Transition};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn load_answers(path: &Path) -> Result<FormSnapshot> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file: {}", path.display()))?;
    parse_answers_toml(&text)
        .with_context(|| format!("Invalid answers file: {}", path.display()))
}

/// Validate every gating step. Fails on the first step that would block.
pub fn check(schema: &WizardSchema, answers: &FormSnapshot, out: &mut dyn Write) -> Result<()> {
    match validate_all(schema, answers) {
        None => {
            writeln!(out, "✅ All {} steps pass", schema.total_steps())?;
            Ok(())
        }
        Some((step, failure)) => {
            writeln!(
                out,
                "❌ Step {} ({}): {}",
                step, failure.field, failure.message
            )?;
            bail!("answers do not pass step {}", step)
        }
    }
}

pub fn render(
    schema: &WizardSchema,
    mut answers: FormSnapshot,
    image: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    if let Some(path) = image {
        if !schema.preview.show_image {
            bail!("the {} wizard has no header image", schema.name);
        }
        let file = FileUpload::from_path(path)?;
        let accepted = accept_file(&file)
            .with_context(|| format!("Image rejected: {}", path.display()))?;
        info!("🖼️ Using {} ({} bytes)", file.name, accepted.byte_len);
        answers.set_image(accepted);
    }
    writeln!(out, "{}", render_snapshot(schema, &answers))?;
    Ok(())
}

/// Drive the step controller with the answers typed in up front.
///
/// Every transition is printed; a blocked step ends the walk with an error.
pub fn walk(config: &WizardConfig, answers: &FormSnapshot, out: &mut dyn Write) -> Result<String> {
    let ports = HeadlessPorts::from_answers(answers);
    let mut controller = StepController::from_config(config, ports, ManualClock::new())?;
    controller.start();
    writeln!(
        out,
        "Step 1/{}: {}",
        controller.total_steps(),
        step_title(controller.schema(), 1)
    )?;

    loop {
        let transition = controller.advance();
        controller.complete_animation();
        match transition {
            Transition::Moved { to, .. } => {
                writeln!(
                    out,
                    "Step {}/{}: {}",
                    to,
                    controller.total_steps(),
                    step_title(controller.schema(), to)
                )?;
            }
            Transition::Completed => {
                let link = controller.site_link();
                writeln!(out, "🎉 Done: {}", link)?;
                return Ok(link);
            }
            Transition::Blocked(failure) => {
                writeln!(
                    out,
                    "⚠ Blocked on step {}: {}",
                    controller.current_step(),
                    failure.message
                )?;
                bail!("walk stopped at step {}", controller.current_step());
            }
            other => bail!("unexpected transition: {:?}", other),
        }
    }
}

fn step_title(schema: &WizardSchema, step: usize) -> &str {
    schema.step(step).map(|s| s.title.as_str()).unwrap_or("?")
}

pub fn steps(schema: &WizardSchema, out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{} ({} steps, jump policy {:?})",
        schema.name,
        schema.total_steps(),
        schema.jump_policy
    )?;
    for (idx, step) in schema.steps.iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, step.title)?;
        for field in &step.fields {
            let rule = match &field.rule {
                FieldRule::Optional => "optional".to_string(),
                FieldRule::Required => "required".to_string(),
                FieldRule::Email => "email".to_string(),
                FieldRule::OneOf { options } => format!("one of {}", options.join(", ")),
            };
            writeln!(out, "   - {} [{}] {}", field.key, rule, field.label)?;
        }
    }
    Ok(())
}

pub fn theme_show(store: &ThemeStore, prefers_dark: bool, out: &mut dyn Write) -> Result<Theme> {
    let theme = resolve_theme(store.load()?, prefers_dark);
    writeln!(out, "{} {}", theme.icon(), theme)?;
    Ok(theme)
}

pub fn theme_toggle(store: &ThemeStore, prefers_dark: bool, out: &mut dyn Write) -> Result<Theme> {
    let theme = store.toggle(prefers_dark)?;
    writeln!(out, "{} {}", theme.icon(), theme)?;
    Ok(theme)
}
