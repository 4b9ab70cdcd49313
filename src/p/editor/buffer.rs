//! Line-based text buffer with a single cursor.
//!
//! Columns are counted in `char`s, not bytes, so every cursor position is a
//! valid insertion point. The buffer always holds at least one (possibly
//! empty) line, and `text()` reproduces the original input exactly,
//! trailing newline included.

/// Cursor position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    cursor: Position,
    /// Column to return to when moving vertically through shorter lines.
    preferred_col: Option<usize>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_index(s: &str, col: usize) -> usize {
    s.char_indices().nth(col).map(|(i, _)| i).unwrap_or(s.len())
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
            preferred_col: None,
        }
    }

    /// Builds a buffer from existing text, with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let row = lines.len() - 1;
        let col = char_len(&lines[row]);
        Self {
            lines,
            cursor: Position::new(row, col),
            preferred_col: None,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    fn current_line(&self) -> &String {
        &self.lines[self.cursor.row]
    }

    fn current_len(&self) -> usize {
        char_len(self.current_line())
    }

    fn last_row(&self) -> usize {
        self.lines.len() - 1
    }

    fn set_col(&mut self, col: usize) {
        self.cursor.col = col;
        self.preferred_col = None;
    }

    // --- editing ---

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        let Position { row, col } = self.cursor;
        let idx = byte_index(&self.lines[row], col);
        self.lines[row].insert(idx, ch);
        self.set_col(col + 1);
    }

    /// Inserts a string, normalizing `\r\n` and lone `\r` to `\n`.
    pub fn insert_str(&mut self, s: &str) {
        let normalized = s.replace("\r\n", "\n").replace('\r', "\n");
        for ch in normalized.chars() {
            self.insert_char(ch);
        }
    }

    /// Splits the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let Position { row, col } = self.cursor;
        let idx = byte_index(&self.lines[row], col);
        let rest = self.lines[row].split_off(idx);
        self.lines.insert(row + 1, rest);
        self.cursor = Position::new(row + 1, 0);
        self.preferred_col = None;
    }

    /// Deletes the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let Position { row, col } = self.cursor;
        if col > 0 {
            let idx = byte_index(&self.lines[row], col - 1);
            self.lines[row].remove(idx);
            self.set_col(col - 1);
        } else if row > 0 {
            let current = self.lines.remove(row);
            let prev_len = char_len(&self.lines[row - 1]);
            self.lines[row - 1].push_str(&current);
            self.cursor = Position::new(row - 1, prev_len);
            self.preferred_col = None;
        }
    }

    /// Deletes the character under the cursor, joining the next line at EOL.
    pub fn delete(&mut self) {
        let Position { row, col } = self.cursor;
        if col < self.current_len() {
            let idx = byte_index(&self.lines[row], col);
            self.lines[row].remove(idx);
        } else if row < self.last_row() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
        }
        self.preferred_col = None;
    }

    /// Deletes back to the start of the previous word.
    pub fn delete_word_back(&mut self) {
        let end = self.cursor;
        if end.col == 0 {
            self.backspace();
            return;
        }
        self.word_left();
        let start = self.cursor;
        if start.row != end.row {
            // word_left never crosses a line from a non-zero column
            return;
        }
        let line = &mut self.lines[end.row];
        let from = byte_index(line, start.col);
        let to = byte_index(line, end.col);
        line.replace_range(from..to, "");
    }

    /// Deletes from the line start to the cursor.
    pub fn delete_to_line_start(&mut self) {
        let Position { row, col } = self.cursor;
        let idx = byte_index(&self.lines[row], col);
        self.lines[row].replace_range(..idx, "");
        self.set_col(0);
    }

    /// Deletes from the cursor to the line end; at the end, joins the next line.
    pub fn delete_to_line_end(&mut self) {
        let Position { row, col } = self.cursor;
        if col < self.current_len() {
            let idx = byte_index(&self.lines[row], col);
            self.lines[row].truncate(idx);
        } else if row < self.last_row() {
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
        }
        self.preferred_col = None;
    }

    // --- movement ---

    pub fn move_left(&mut self) {
        let Position { row, col } = self.cursor;
        if col > 0 {
            self.set_col(col - 1);
        } else if row > 0 {
            self.cursor.row = row - 1;
            let len = self.current_len();
            self.set_col(len);
        }
    }

    pub fn move_right(&mut self) {
        let Position { row, col } = self.cursor;
        if col < self.current_len() {
            self.set_col(col + 1);
        } else if row < self.last_row() {
            self.cursor.row = row + 1;
            self.set_col(0);
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor.row == 0 {
            self.set_col(0);
            return;
        }
        let target = self.preferred_col.unwrap_or(self.cursor.col);
        self.cursor.row -= 1;
        self.cursor.col = target.min(self.current_len());
        self.preferred_col = Some(target);
    }

    pub fn move_down(&mut self) {
        if self.cursor.row == self.last_row() {
            let len = self.current_len();
            self.set_col(len);
            return;
        }
        let target = self.preferred_col.unwrap_or(self.cursor.col);
        self.cursor.row += 1;
        self.cursor.col = target.min(self.current_len());
        self.preferred_col = Some(target);
    }

    pub fn page_up(&mut self, rows: usize) {
        for _ in 0..rows.max(1) {
            if self.cursor.row == 0 {
                break;
            }
            self.move_up();
        }
    }

    pub fn page_down(&mut self, rows: usize) {
        for _ in 0..rows.max(1) {
            if self.cursor.row == self.last_row() {
                break;
            }
            self.move_down();
        }
    }

    pub fn line_start(&mut self) {
        self.set_col(0);
    }

    pub fn line_end(&mut self) {
        let len = self.current_len();
        self.set_col(len);
    }

    pub fn buffer_start(&mut self) {
        self.cursor = Position::default();
        self.preferred_col = None;
    }

    pub fn buffer_end(&mut self) {
        self.cursor.row = self.last_row();
        self.line_end();
    }

    /// Moves to the start of the current or previous word.
    pub fn word_left(&mut self) {
        if self.cursor.col == 0 {
            self.move_left();
            return;
        }
        let chars: Vec<char> = self.current_line().chars().collect();
        let mut col = self.cursor.col;
        while col > 0 && chars[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !chars[col - 1].is_whitespace() {
            col -= 1;
        }
        self.set_col(col);
    }

    /// Moves past the end of the current or next word.
    pub fn word_right(&mut self) {
        let chars: Vec<char> = self.current_line().chars().collect();
        if self.cursor.col >= chars.len() {
            self.move_right();
            return;
        }
        let mut col = self.cursor.col;
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }
        while col < chars.len() && !chars[col].is_whitespace() {
            col += 1;
        }
        self.set_col(col);
    }
}
