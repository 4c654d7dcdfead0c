//! Editable text for wizard fields.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single form field's text with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    value: String,
    /// Byte index into `value`, always on a char boundary.
    cursor: usize,
    multiline: bool,
}

impl TextInput {
    pub fn new(multiline: bool) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            multiline,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.value.len();
    }

    /// Newline for multi-line fields; single-line fields ignore it.
    pub fn newline(&mut self) -> bool {
        if !self.multiline {
            return false;
        }
        self.insert("\n");
        true
    }

    pub fn insert(&mut self, text: &str) {
        let text: String = if self.multiline {
            text.to_string()
        } else {
            text.chars().filter(|c| *c != '\n' && *c != '\r').collect()
        };
        self.value.insert_str(self.cursor, &text);
        self.cursor += text.len();
    }

    /// Returns true when the key edited or moved within the field.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                self.cursor = 0;
                true
            }
            KeyCode::Char('w') if ctrl => {
                let end = self.cursor;
                let start = self.word_start();
                self.value.drain(start..end);
                self.cursor = start;
                true
            }
            KeyCode::Char(_) if ctrl => false,
            KeyCode::Char(c) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            KeyCode::Backspace => {
                if let Some(prev) = self.prev_boundary() {
                    self.value.remove(prev);
                    self.cursor = prev;
                }
                true
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
                true
            }
            KeyCode::Left => {
                self.cursor = self.prev_boundary().unwrap_or(0);
                true
            }
            KeyCode::Right => {
                if let Some(c) = self.value[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                true
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor].char_indices().last().map(|(i, _)| i)
    }

    fn word_start(&self) -> usize {
        let head = &self.value[..self.cursor];
        let trimmed = head.trim_end();
        trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0)
    }
}
