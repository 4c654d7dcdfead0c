use crate::app::{App, Mode};
use crate::ports::Screen;
use crate::widgets::{indicator_line, Palette};
use okenaba_core::preview::{build_preview, Preview, PreviewBlock, PLACEHOLDER_TEXT};
use okenaba_ports::{NoticeKind, StepState};
use okenaba_workflow::exit_guard::EXIT_PROMPT;
use okenaba_workflow::Clock;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw<C: Clock + Clone>(f: &mut Frame, app: &mut App<C>) {
    let palette = app.palette();
    f.render_widget(Block::default().style(palette.base()), f.area());

    // Title | Indicator | Body | Status | Keys
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    let schema_name = app.controller().schema().name.clone();
    let title_line = Line::from(vec![
        Span::styled("🧭 Okenaba", Style::default().fg(palette.fg)),
        Span::raw(" | "),
        Span::styled(schema_name, Style::default().fg(palette.accent)),
        Span::raw(" | "),
        Span::raw(format!("{} {}", app.theme().icon(), app.theme())),
    ]);
    f.render_widget(Block::default().borders(Borders::ALL).title(title_line), chunks[0]);

    let (states, connectors) = indicator_states(app);
    let indicator = Paragraph::new(indicator_line(&states, &connectors, &palette))
        .block(Block::default().borders(Borders::ALL).title("Progress"));
    f.render_widget(indicator, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(chunks[2]);

    let (panel_title, panel_lines) = main_panel(app, &palette);
    let panel = Paragraph::new(panel_lines)
        .wrap(Wrap { trim: false })
        .scroll((app.ports().scroll(), 0))
        .block(Block::default().borders(Borders::ALL).title(panel_title));
    f.render_widget(panel, body[0]);

    let preview = Paragraph::new(preview_lines(app, &palette))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Preview"));
    f.render_widget(preview, body[1]);

    let status = match app.ports_mut().latest_notification() {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Info => palette.success,
                NoticeKind::Error => palette.error,
            };
            Line::from(Span::styled(notice.message, Style::default().fg(color)))
        }
        None => Line::from(Span::styled(
            app.theme().toggle_label().to_string() + " with F2",
            Style::default().fg(palette.muted),
        )),
    };
    f.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::ALL).title("Status")),
        chunks[3],
    );

    f.render_widget(
        Paragraph::new(key_legend(app)).block(Block::default().borders(Borders::ALL).title("Keys")),
        chunks[4],
    );

    match app.mode() {
        Mode::ConfirmExit => draw_modal(f, &palette, "Leave onboarding?", EXIT_PROMPT, "y / n"),
        Mode::ImagePath(input) => {
            let text = format!("{}▏", input.value());
            draw_modal(f, &palette, "Header image", &text, "Enter to upload, Esc to cancel");
        }
        Mode::Editing => {}
    }
}

fn draw_modal(f: &mut Frame, palette: &Palette, title: &str, body: &str, hint: &str) {
    let area = centered(f.area(), 60, 7);
    let lines = vec![
        Line::from(body.to_string()),
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), Style::default().fg(palette.muted))),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .style(palette.base())
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn indicator_states<C: Clock + Clone>(app: &App<C>) -> (Vec<StepState>, Vec<bool>) {
    let total = app.controller().total_steps();
    let ports = app.ports();
    let states = (1..=total).map(|step| ports.step_state(step)).collect();
    let connectors = (1..total).map(|index| ports.connector_done(index)).collect();
    (states, connectors)
}

fn main_panel<C: Clock + Clone>(app: &App<C>, palette: &Palette) -> (String, Vec<Line<'static>>) {
    match app.ports().screen() {
        Screen::Success { site_link } => {
            let lines = vec![
                Line::from(Span::styled(
                    "🎉 Your site is ready!",
                    Style::default()
                        .fg(palette.success)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(
                    site_link.clone(),
                    Style::default().fg(palette.accent),
                )),
                Line::from(""),
                Line::from("Press c to copy the link, r to start over."),
            ];
            ("Done".to_string(), lines)
        }
        Screen::Step { step, .. } => {
            let schema = app.controller().schema();
            let Some(step_schema) = schema.step(*step) else {
                return (format!("Step {}", step), Vec::new());
            };

            let mut lines = Vec::new();
            if let Some(description) = &step_schema.description {
                lines.push(Line::from(Span::styled(
                    description.clone(),
                    Style::default().fg(palette.muted),
                )));
                lines.push(Line::from(""));
            }

            let focused = app.focused_field();
            for spec in &step_schema.fields {
                let marker = if Some(spec.key) == focused { "▶ " } else { "  " };
                let label_style = if Some(spec.key) == focused {
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(palette.fg)
                };
                let required = if spec.is_gating() { " *" } else { "" };
                lines.push(Line::from(Span::styled(
                    format!("{}{}{}", marker, spec.label, required),
                    label_style,
                )));

                let value = app
                    .ports()
                    .input(spec.key)
                    .map(|input| input.value().to_string())
                    .unwrap_or_default();
                for text_line in value.split('\n') {
                    lines.push(Line::from(format!("    {}", text_line)));
                }
                if let Some(error) = app.ports().error(spec.key) {
                    lines.push(Line::from(Span::styled(
                        format!("    ⚠ {}", error),
                        Style::default().fg(palette.error),
                    )));
                }
                lines.push(Line::from(""));
            }
            if step_schema.fields.is_empty() {
                lines.push(Line::from("Press Enter to begin."));
            }

            (
                format!("{} ({}/{})", step_schema.title, step, schema.total_steps()),
                lines,
            )
        }
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Title,
    Accent,
    Muted,
    Text,
}

fn preview_text(preview: &Preview) -> Vec<(String, Tone)> {
    let mut out = Vec::new();
    match preview {
        Preview::Placeholder => out.push((PLACEHOLDER_TEXT.to_string(), Tone::Muted)),
        Preview::Site(blocks) => {
            for block in blocks {
                match block {
                    PreviewBlock::HeaderImage { data_url, .. } => {
                        let text = if data_url.is_some() {
                            "[header image]"
                        } else {
                            "[👤]"
                        };
                        out.push((text.to_string(), Tone::Muted));
                    }
                    PreviewBlock::Name(name) => out.push((name.clone(), Tone::Title)),
                    PreviewBlock::Tagline(tagline) => out.push((tagline.clone(), Tone::Accent)),
                    PreviewBlock::Body(body) => {
                        for line in body.split('\n') {
                            out.push((line.to_string(), Tone::Text));
                        }
                    }
                    PreviewBlock::CallToAction(cta) => out.push((format!("[ {} ]", cta), Tone::Accent)),
                    PreviewBlock::Contact { email, socials } => {
                        if let Some(email) = email {
                            out.push((format!("✉ {}", email), Tone::Muted));
                        }
                        for link in socials {
                            out.push((format!("{}: {}", link.kind.label(), link.url), Tone::Muted));
                        }
                    }
                }
            }
        }
    }
    out
}

fn preview_lines<C: Clock + Clone>(app: &App<C>, palette: &Palette) -> Vec<Line<'static>> {
    let schema = app.controller().schema();
    let preview = build_preview(&schema.preview, app.controller().snapshot());
    preview_text(&preview)
        .into_iter()
        .map(|(text, tone)| {
            let style = match tone {
                Tone::Title => Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                Tone::Accent => Style::default().fg(palette.accent),
                Tone::Muted => Style::default().fg(palette.muted),
                Tone::Text => Style::default().fg(palette.fg),
            };
            Line::from(Span::styled(text, style))
        })
        .collect()
}

fn key_legend<C: Clock + Clone>(app: &App<C>) -> String {
    if app.controller().is_completed() {
        return "c Copy link | r Start over | Enter Finish | F2 Theme".to_string();
    }
    let mut keys = vec![
        "Enter Next",
        "Esc Back",
        "Tab Field",
        "Alt+N Jump",
        "Ctrl+S Submit",
    ];
    if app.controller().schema().preview.show_image {
        keys.push("Ctrl+O Image");
    }
    keys.push("F2 Theme");
    keys.push("Ctrl+Q Leave");
    keys.join(" | ")
}

/// Plain-text rendering of the current screen, for logs and tests.
pub fn dump_step<C: Clock + Clone>(app: &App<C>) -> String {
    let (states, connectors) = indicator_states(app);
    let palette = app.palette();
    let indicator: String = indicator_line(&states, &connectors, &palette)
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect();
    let (title, lines) = main_panel(app, &palette);
    let body = lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n");
    let preview = preview_lines(app, &palette)
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "STEP: {}\n- Indicator: {}\n- Body:\n{}\n- Preview:\n{}\n- Keys: {}\n",
        title,
        indicator,
        body,
        preview,
        key_legend(app)
    )
}
