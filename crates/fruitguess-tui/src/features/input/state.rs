//! Single-line entry field for questions and guesses.
//!
//! The field only edits and hands out text. It has no idea whether a game
//! is running; the reducer decides what a submitted line means.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

/// Which form a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Question,
    Answer,
}

impl InputKind {
    pub fn title(self) -> &'static str {
        match self {
            InputKind::Question => "Ask",
            InputKind::Answer => "Guess",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            InputKind::Question => "Ask a yes/no question (e.g. \"Is it red?\")",
            InputKind::Answer => "Your answer (e.g. Banana)",
        }
    }
}

/// One line of uncommitted text with a cursor (char index).
#[derive(Debug, Clone)]
pub struct InputState {
    kind: InputKind,
    text: String,
    cursor: usize,
}

impl InputState {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display columns between the start of the line and the cursor.
    pub fn cursor_columns(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor)
            .map(|c| c.width().unwrap_or(0))
            .sum()
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = char_to_byte_index(&self.text, self.cursor);
        self.text.insert(idx, ch);
        self.cursor += 1;
    }

    /// Inserts pasted text. Line breaks and tabs become spaces, other control
    /// characters are dropped.
    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\r' => {}
                '\n' | '\t' => self.insert_char(' '),
                c if c.is_control() => {}
                c => self.insert_char(c),
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = char_to_byte_index(&self.text, self.cursor);
        self.text.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let idx = char_to_byte_index(&self.text, self.cursor);
        self.text.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Deletes from the cursor back to the start of the line (Ctrl+U).
    pub fn kill_to_start(&mut self) {
        let idx = char_to_byte_index(&self.text, self.cursor);
        self.text.replace_range(..idx, "");
        self.cursor = 0;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Takes the trimmed text and clears the field.
    ///
    /// Returns `None` and leaves the field untouched when it holds only
    /// whitespace.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let submitted = trimmed.to_string();
        self.clear();
        Some(submitted)
    }

    /// Applies an editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.move_home(),
            KeyCode::Char('e') if ctrl => self.move_end(),
            KeyCode::Char('u') if ctrl => self.kill_to_start(),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => return false,
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(idx, _)| idx)
}
