//! Small, reusable UI helpers.

use okenaba_core::theme::Theme;
use okenaba_ports::StepState;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Black,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                error: Color::LightRed,
                success: Color::LightGreen,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                accent: Color::Blue,
                muted: Color::Gray,
                error: Color::Red,
                success: Color::Green,
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

pub fn step_marker(state: StepState, step: usize) -> String {
    match state {
        StepState::Completed => "✓".to_string(),
        StepState::Active | StepState::Pending => step.to_string(),
    }
}

/// `(✓)━━(2)──(3)`: circles for steps, connectors between them.
pub fn indicator_line(
    states: &[StepState],
    connectors: &[bool],
    palette: &Palette,
) -> Line<'static> {
    let mut spans = Vec::new();
    for (idx, state) in states.iter().enumerate() {
        let step = idx + 1;
        let style = match state {
            StepState::Completed => Style::default().fg(palette.success),
            StepState::Active => Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
            StepState::Pending => Style::default().fg(palette.muted),
        };
        spans.push(Span::styled(format!("({})", step_marker(*state, step)), style));

        if let Some(done) = connectors.get(idx) {
            let (bar, color) = if *done {
                ("━━", palette.success)
            } else {
                ("──", palette.muted)
            };
            spans.push(Span::styled(bar, Style::default().fg(color)));
        }
    }
    Line::from(spans)
}
