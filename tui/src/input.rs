//! Single-line text fields.
//!
//! [`TextField`] backs every editable control in the editor: the value of
//! the selected parameter, the name in the add form, and the command
//! prompt. It keeps a `Vec<char>` buffer so cursor arithmetic is by
//! character, not byte. Screen positions are measured in terminal columns,
//! where wide characters take two.

use ratatui::text::Span;

use crate::app::Key;


/// An editable line of text with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    buffer: Vec<char>,
    cursor: usize,
}


impl TextField {
    pub fn new() -> Self {
        TextField::default()
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.chars().collect();
        self.cursor = self.buffer.len();
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, ch: char) {
        self.buffer.insert(self.cursor, ch);
        self.cursor += 1;
    }

    /// Backspace.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.buffer.remove(self.cursor);
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.buffer.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Delete the word before the cursor, along with any separators
    /// between it and the cursor (Ctrl-W).
    pub fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let end = self.cursor;
        while self.cursor > 0 && !self.buffer[self.cursor - 1].is_alphanumeric() {
            self.cursor -= 1;
        }
        while self.cursor > 0 && self.buffer[self.cursor - 1].is_alphanumeric() {
            self.cursor -= 1;
        }
        self.buffer.drain(self.cursor..end);
        true
    }

    /// Clear everything (Ctrl-U).
    fn kill_line(&mut self) -> bool {
        let had_text = !self.buffer.is_empty();
        self.clear();
        had_text
    }

    /// Apply an editing key. Returns `true` when the text changed, so the
    /// caller can push the new value to the store on every keystroke.
    /// Keys that are not editing keys are ignored.
    pub fn handle_edit_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Char(ch) if !ch.is_control() => {
                self.insert(*ch);
                true
            }
            Key::Backspace => self.delete_back(),
            Key::Delete => self.delete_forward(),
            Key::Left => {
                self.move_left();
                false
            }
            Key::Right => {
                self.move_right();
                false
            }
            Key::Home | Key::Ctrl('a') => {
                self.move_home();
                false
            }
            Key::End | Key::Ctrl('e') => {
                self.move_end();
                false
            }
            Key::Ctrl('w') => self.delete_word_back(),
            Key::Ctrl('u') => self.kill_line(),
            _ => false,
        }
    }

    /// The slice of text that fits in `width` columns, scrolled so the
    /// cursor stays visible, plus the cursor column within that slice.
    pub fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        // One column is kept free for the cursor itself.
        let mut start = 0;
        while start < self.cursor && columns(&self.buffer[start..self.cursor]) >= width {
            start += 1;
        }

        let mut shown = String::new();
        let mut used = 0;
        for &ch in &self.buffer[start..] {
            let w = char_width(ch);
            if used + w > width {
                break;
            }
            shown.push(ch);
            used += w;
        }
        (shown, columns(&self.buffer[start..self.cursor]))
    }
}


/// Terminal columns taken by `ch`.
fn char_width(ch: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*ch.encode_utf8(&mut buf)).width()
}

fn columns(chars: &[char]) -> usize {
    chars.iter().map(|&ch| char_width(ch)).sum()
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> TextField {
        let mut field = TextField::new();
        for ch in text.chars() {
            field.insert(ch);
        }
        field
    }

    #[test]
    fn new_is_empty() {
        let field = TextField::new();
        assert!(field.is_empty());
        assert_eq!(field.text(), "");
        assert_eq!(field.cursor, 0);
    }

    #[test]
    fn set_text_moves_cursor_to_end() {
        let mut field = TextField::new();
        field.set_text("макси");
        assert_eq!(field.text(), "макси");
        assert_eq!(field.cursor, 5);
    }

    #[test]
    fn insert_in_middle() {
        let mut field = typed("ac");
        field.move_left();
        field.insert('b');
        assert_eq!(field.text(), "abc");
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn delete_back_reports_change() {
        let mut field = typed("ab");
        assert!(field.delete_back());
        assert_eq!(field.text(), "a");
        field.move_home();
        assert!(!field.delete_back());
    }

    #[test]
    fn delete_forward_reports_change() {
        let mut field = typed("ab");
        assert!(!field.delete_forward());
        field.move_home();
        assert!(field.delete_forward());
        assert_eq!(field.text(), "b");
    }

    #[test]
    fn cursor_moves_clamp() {
        let mut field = typed("xy");
        field.move_right();
        assert_eq!(field.cursor, 2);
        field.move_home();
        field.move_left();
        assert_eq!(field.cursor, 0);
        field.move_end();
        assert_eq!(field.cursor, 2);
    }

    #[test]
    fn delete_word_back_keeps_earlier_words() {
        let mut field = typed("очень длинное");
        assert!(field.delete_word_back());
        assert_eq!(field.text(), "очень ");
        assert!(field.delete_word_back());
        assert_eq!(field.text(), "");
        assert!(!field.delete_word_back());
    }

    #[test]
    fn edit_keys_report_changes() {
        let mut field = TextField::new();
        assert!(field.handle_edit_key(&Key::Char('п')));
        assert!(!field.handle_edit_key(&Key::Left));
        assert!(!field.handle_edit_key(&Key::End));
        assert!(field.handle_edit_key(&Key::Backspace));
        assert!(!field.handle_edit_key(&Key::Backspace));
        assert!(!field.handle_edit_key(&Key::Ctrl('x')));
    }

    #[test]
    fn ctrl_u_clears_only_when_non_empty() {
        let mut field = typed("abc");
        assert!(field.handle_edit_key(&Key::Ctrl('u')));
        assert!(field.is_empty());
        assert!(!field.handle_edit_key(&Key::Ctrl('u')));
    }

    #[test]
    fn control_chars_are_not_inserted() {
        let mut field = TextField::new();
        assert!(!field.handle_edit_key(&Key::Char('\0')));
        assert!(field.is_empty());
    }

    #[test]
    fn visible_short_text() {
        let field = typed("abc");
        assert_eq!(field.visible(10), ("abc".to_string(), 3));
    }

    #[test]
    fn visible_scrolls_to_cursor() {
        let field = typed("abcdefghij");
        let (shown, col) = field.visible(4);
        assert_eq!(shown, "hij");
        assert_eq!(col, 3);
    }

    #[test]
    fn visible_with_cursor_at_start() {
        let mut field = typed("abcdefghij");
        field.move_home();
        assert_eq!(field.visible(4), ("abcd".to_string(), 0));
    }

    #[test]
    fn visible_counts_wide_chars_as_two_columns() {
        let field = typed("日本語");
        assert_eq!(field.visible(10), ("日本語".to_string(), 6));
        let (shown, col) = field.visible(4);
        assert_eq!(shown, "語");
        assert_eq!(col, 2);
    }

    #[test]
    fn visible_stops_before_splitting_wide_char() {
        let mut field = typed("a日本");
        field.move_home();
        assert_eq!(field.visible(4), ("a日".to_string(), 0));
    }

    #[test]
    fn visible_zero_width() {
        let field = typed("abc");
        assert_eq!(field.visible(0), (String::new(), 0));
    }
}
