/// Which way a step transition animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Derived from `sign(to - from)`.
    pub fn between(from: usize, to: usize) -> Direction {
        if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Step panels, the success screen and the viewport.
pub trait StepView {
    fn show_step(&mut self, step: usize, direction: Direction);

    fn show_success(&mut self, site_link: &str);

    fn scroll_to_top(&mut self);
}

/// Single slot for the rendered preview; replaced wholesale on every render.
pub trait PreviewSink {
    fn replace_preview(&mut self, fragment: &str);
}
