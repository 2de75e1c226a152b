//! Single-line text editor used by the add/update prompts.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Default, Clone)]
pub struct LineInput {
    text: String,
    /// Cursor position in chars, not bytes.
    cursor: usize,
}

impl LineInput {
    pub fn value(&self) -> &str {
        &self.text
    }

    /// Text left of the cursor.
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_index()]
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.text = value.into();
        self.move_cursor_end();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => self.clear(),
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => self.delete_word_backwards(),
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.cursor = 0,
            (KeyModifiers::CONTROL, KeyCode::Char('e')) => self.move_cursor_end(),
            (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => self.enter_char(c),
            (_, KeyCode::Backspace) => self.delete_char(),
            (_, KeyCode::Delete) => self.delete_char_forward(),
            (_, KeyCode::Left) => self.move_cursor_left(),
            (_, KeyCode::Right) => self.move_cursor_right(),
            (_, KeyCode::Home) => self.cursor = 0,
            (_, KeyCode::End) => self.move_cursor_end(),
            _ => return false,
        }
        true
    }

    fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    fn move_cursor_end(&mut self) {
        self.cursor = self.char_count();
    }

    fn enter_char(&mut self, c: char) {
        let index = self.byte_index();
        self.text.insert(index, c);
        self.move_cursor_right();
    }

    fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.move_cursor_left();
        let index = self.byte_index();
        self.text.remove(index);
    }

    fn delete_char_forward(&mut self) {
        if self.cursor >= self.char_count() {
            return;
        }
        let index = self.byte_index();
        self.text.remove(index);
    }

    fn delete_word_backwards(&mut self) {
        while self.cursor > 0 && self.char_before_cursor().is_some_and(char::is_whitespace) {
            self.delete_char();
        }
        while self.cursor > 0 && self.char_before_cursor().is_some_and(|c| !c.is_whitespace()) {
            self.delete_char();
        }
    }

    fn char_before_cursor(&self) -> Option<char> {
        self.text.chars().nth(self.cursor.checked_sub(1)?)
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len())
    }
}
