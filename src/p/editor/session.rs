//! Editor state machine.
//!
//! [`EditorSession::step`] consumes one terminal event and either updates the
//! buffer or reports how the session ended. It performs no I/O, so the whole
//! key table can be driven from tests with synthetic events. The terminal
//! adapter in [`super::terminal`] only reads events, calls `step`, and draws.
//!
//! | Key                         | Effect                         |
//! |-----------------------------|--------------------------------|
//! | Esc, Ctrl+C                 | cancel                         |
//! | Ctrl+D, Alt+Enter           | submit                         |
//! | Enter                       | newline                        |
//! | printable char, Tab         | insert (Tab inserts 4 spaces)  |
//! | Backspace / Delete          | delete before / under cursor   |
//! | arrows, Home, End, PgUp/Dn  | move                           |
//! | Ctrl/Alt + Left/Right       | move by word                   |
//! | Ctrl+W, Alt+Backspace       | delete previous word           |
//! | Ctrl+U / Ctrl+K             | delete to line start / end     |
//! | Ctrl+A / Ctrl+E             | line start / end               |

use super::buffer::{Position, TextBuffer};
use super::EditOutcome;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use unicode_width::UnicodeWidthChar;

/// Rows above the text area: the help line and a spacer.
pub const HEADER_ROWS: u16 = 2;
/// Rows and columns taken by the text area's border.
pub const BORDER_SIZE: u16 = 2;

const TAB: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Submit,
    Cancel,
}

/// The visible window onto the buffer, in rows and display columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub top: usize,
    pub left: usize,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    /// The text area left over in a terminal of the given size.
    pub fn for_terminal(width: u16, height: u16) -> Self {
        Self {
            top: 0,
            left: 0,
            width: width.saturating_sub(BORDER_SIZE),
            height: height.saturating_sub(HEADER_ROWS + BORDER_SIZE),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::for_terminal(80, 24)
    }
}

pub struct EditorSession {
    buffer: TextBuffer,
    viewport: Viewport,
    placeholder: Option<String>,
    /// Only a session that starts empty ever shows its placeholder.
    show_placeholder: bool,
}

/// Tabs are drawn as a fixed run of spaces, the same width Tab inserts.
fn char_width(ch: char) -> usize {
    if ch == '\t' {
        return TAB.len();
    }
    ch.width().unwrap_or(0)
}

/// Display width of the first `col` chars of `line`.
fn display_col(line: &str, col: usize) -> usize {
    line.chars().take(col).map(char_width).sum()
}

/// The slice of `line` that falls inside `[left, left + width)` display
/// columns. Wide characters straddling either edge are dropped.
fn clip_line(line: &str, left: usize, width: usize) -> String {
    let mut out = String::new();
    let mut pos = 0;
    for ch in line.chars() {
        let w = char_width(ch);
        if ch == '\t' {
            let shown = (pos..pos + w).filter(|c| *c >= left && *c < left + width);
            out.extend(shown.map(|_| ' '));
        } else if pos >= left && pos + w <= left + width {
            out.push(ch);
        }
        pos += w;
        if pos >= left + width {
            break;
        }
    }
    out
}

impl EditorSession {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(initial),
            viewport: Viewport::default(),
            placeholder: None,
            show_placeholder: initial.is_empty(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Sets the viewport to fit a terminal of `width` x `height`.
    pub fn resize(&mut self, width: u16, height: u16) {
        let Viewport { top, left, .. } = self.viewport;
        self.viewport = Viewport {
            top,
            left,
            ..Viewport::for_terminal(width, height)
        };
        self.scroll_to_cursor();
    }

    /// The placeholder, while it should be displayed.
    pub fn placeholder(&self) -> Option<&str> {
        if self.show_placeholder && self.buffer.is_empty() {
            self.placeholder.as_deref()
        } else {
            None
        }
    }

    /// Buffer lines clipped to the viewport.
    pub fn visible_lines(&self) -> Vec<String> {
        let Viewport {
            top,
            left,
            width,
            height,
        } = self.viewport;
        self.buffer
            .lines()
            .iter()
            .skip(top)
            .take(height as usize)
            .map(|line| clip_line(line, left, width as usize))
            .collect()
    }

    /// Cursor position relative to the text area's top-left corner.
    pub fn cursor_offset(&self) -> (u16, u16) {
        let Position { row, col } = self.buffer.cursor();
        let x = display_col(&self.buffer.lines()[row], col).saturating_sub(self.viewport.left);
        let y = row.saturating_sub(self.viewport.top);
        (x as u16, y as u16)
    }

    /// Advances the session by one event.
    pub fn step(&mut self, event: &Event) -> Option<SessionExit> {
        let exit = match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                self.buffer.insert_str(text);
                None
            }
            Event::Resize(width, height) => {
                self.resize(*width, *height);
                None
            }
            _ => None,
        };
        if exit.is_none() {
            self.scroll_to_cursor();
        }
        exit
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<SessionExit> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let page = (self.viewport.height as usize).max(1);
        let buf = &mut self.buffer;

        match key.code {
            KeyCode::Esc => return Some(SessionExit::Cancel),
            KeyCode::Char('c') if ctrl => return Some(SessionExit::Cancel),
            KeyCode::Char('d') if ctrl => return Some(SessionExit::Submit),
            KeyCode::Enter if alt => return Some(SessionExit::Submit),
            KeyCode::Enter => buf.insert_newline(),

            KeyCode::Char('w') if ctrl => buf.delete_word_back(),
            KeyCode::Char('u') if ctrl => buf.delete_to_line_start(),
            KeyCode::Char('k') if ctrl => buf.delete_to_line_end(),
            KeyCode::Char('a') if ctrl => buf.line_start(),
            KeyCode::Char('e') if ctrl => buf.line_end(),
            KeyCode::Char('b') if alt => buf.word_left(),
            KeyCode::Char('f') if alt => buf.word_right(),
            // AltGr arrives as Ctrl+Alt on some platforms.
            KeyCode::Char(ch) if ctrl && alt => buf.insert_char(ch),
            KeyCode::Char(_) if ctrl || alt => {}
            KeyCode::Char(ch) => buf.insert_char(ch),
            KeyCode::Tab => buf.insert_str(TAB),

            KeyCode::Backspace if ctrl || alt => buf.delete_word_back(),
            KeyCode::Backspace => buf.backspace(),
            KeyCode::Delete => buf.delete(),

            KeyCode::Left if ctrl || alt => buf.word_left(),
            KeyCode::Right if ctrl || alt => buf.word_right(),
            KeyCode::Left => buf.move_left(),
            KeyCode::Right => buf.move_right(),
            KeyCode::Up => buf.move_up(),
            KeyCode::Down => buf.move_down(),
            KeyCode::Home if ctrl => buf.buffer_start(),
            KeyCode::End if ctrl => buf.buffer_end(),
            KeyCode::Home => buf.line_start(),
            KeyCode::End => buf.line_end(),
            KeyCode::PageUp => buf.page_up(page),
            KeyCode::PageDown => buf.page_down(page),
            _ => {}
        }
        None
    }

    fn scroll_to_cursor(&mut self) {
        let Position { row, col } = self.buffer.cursor();
        let vp = &mut self.viewport;

        let height = (vp.height as usize).max(1);
        if row < vp.top {
            vp.top = row;
        } else if row >= vp.top + height {
            vp.top = row + 1 - height;
        }

        let x = display_col(&self.buffer.lines()[row], col);
        let width = (vp.width as usize).max(1);
        if x < vp.left {
            vp.left = x;
        } else if x >= vp.left + width {
            vp.left = x + 1 - width;
        }
    }

    /// Converts the exit reason into the editor result.
    pub fn finish(self, exit: SessionExit) -> EditOutcome {
        match exit {
            SessionExit::Submit => EditOutcome::Submitted(self.buffer.text()),
            SessionExit::Cancel => EditOutcome::Cancelled,
        }
    }
}

/// Feeds events to a session until it ends.
///
/// Returns `None` if the events run out first.
pub fn drive<I>(mut session: EditorSession, events: I) -> Option<EditOutcome>
where
    I: IntoIterator<Item = Event>,
{
    for event in events {
        if let Some(exit) = session.step(&event) {
            return Some(session.finish(exit));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn alt(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::ALT))
    }

    fn typing(s: &str) -> Vec<Event> {
        s.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    fn run(initial: &str, mut events: Vec<Event>, last: Event) -> Option<EditOutcome> {
        events.push(last);
        drive(EditorSession::new(initial), events)
    }

    #[test]
    fn typing_then_ctrl_d_submits() {
        let outcome = run("", typing("hello"), ctrl('d'));
        assert_eq!(outcome, Some(EditOutcome::Submitted("hello".into())));
    }

    #[test]
    fn escape_cancels_regardless_of_edits() {
        let outcome = run("seed", typing("more"), key(KeyCode::Esc));
        assert_eq!(outcome, Some(EditOutcome::Cancelled));
    }

    #[test]
    fn seeded_text_submits_unchanged() {
        assert_eq!(
            run("hello", vec![], ctrl('d')),
            Some(EditOutcome::Submitted("hello".into()))
        );
        assert_eq!(
            run("hello", vec![], key(KeyCode::Esc)),
            Some(EditOutcome::Cancelled)
        );
    }

    #[test]
    fn ctrl_c_cancels() {
        assert_eq!(run("", vec![], ctrl('c')), Some(EditOutcome::Cancelled));
    }

    #[test]
    fn alt_enter_submits_initial_text_untouched() {
        let outcome = run("keep\nme\n", vec![], alt(KeyCode::Enter));
        assert_eq!(outcome, Some(EditOutcome::Submitted("keep\nme\n".into())));
    }

    #[test]
    fn enter_inserts_newline() {
        let mut events = typing("a");
        events.push(key(KeyCode::Enter));
        events.extend(typing("b"));
        let outcome = run("", events, ctrl('d'));
        assert_eq!(outcome, Some(EditOutcome::Submitted("a\nb".into())));
    }

    #[test]
    fn edits_apply_to_initial_text() {
        // Cursor starts at the end of the initial text.
        let events = vec![
            key(KeyCode::Backspace),
            key(KeyCode::Home),
            key(KeyCode::Char('>')),
        ];
        let outcome = run("Hi there", events, ctrl('d'));
        assert_eq!(outcome, Some(EditOutcome::Submitted(">Hi ther".into())));
    }

    #[test]
    fn unbound_chords_and_releases_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        let events = vec![
            ctrl('z'),
            alt(KeyCode::Char('q')),
            Event::Key(release),
            Event::FocusGained,
        ];
        let outcome = run("", events, ctrl('d'));
        assert_eq!(outcome, Some(EditOutcome::Submitted(String::new())));
    }

    #[test]
    fn paste_inserts_with_unix_newlines() {
        let events = vec![Event::Paste("one\r\ntwo".into())];
        let outcome = run("", events, ctrl('d'));
        assert_eq!(outcome, Some(EditOutcome::Submitted("one\ntwo".into())));
    }

    #[test]
    fn tab_inserts_spaces() {
        let outcome = run("", vec![key(KeyCode::Tab)], ctrl('d'));
        assert_eq!(outcome, Some(EditOutcome::Submitted("    ".into())));
    }

    #[test]
    fn running_out_of_events_yields_nothing() {
        assert_eq!(drive(EditorSession::new(""), typing("abc")), None);
    }

    #[test]
    fn placeholder_only_for_empty_start() {
        let mut session = EditorSession::new("").with_placeholder("Enter your prompt...");
        assert_eq!(session.placeholder(), Some("Enter your prompt..."));
        session.step(&key(KeyCode::Char('x')));
        assert_eq!(session.placeholder(), None);
        session.step(&key(KeyCode::Backspace));
        assert_eq!(session.placeholder(), Some("Enter your prompt..."));

        let seeded = EditorSession::new("text").with_placeholder("Enter your prompt...");
        assert_eq!(seeded.placeholder(), None);
    }

    #[test]
    fn viewport_follows_cursor_vertically() {
        let mut session = EditorSession::new("");
        session.resize(20, 7); // 3 text rows
        for _ in 0..5 {
            session.step(&key(KeyCode::Enter));
        }
        assert_eq!(session.viewport().top, 3);
        assert_eq!(session.cursor_offset(), (0, 2));

        session.step(&Event::Key(KeyEvent::new(KeyCode::Home, KeyModifiers::CONTROL)));
        assert_eq!(session.viewport().top, 0);
    }

    #[test]
    fn viewport_scrolls_horizontally_by_display_width() {
        let mut session = EditorSession::new("");
        session.resize(7, 10); // 5 text columns
        for ev in typing("漢字漢字") {
            session.step(&ev);
        }
        // 8 display columns, cursor at column 8
        assert_eq!(session.viewport().left, 4);
        assert_eq!(session.visible_lines(), vec!["漢字".to_string()]);
        assert_eq!(session.cursor_offset(), (4, 0));
    }

    #[test]
    fn resize_event_updates_viewport() {
        let mut session = EditorSession::new("");
        session.step(&Event::Resize(100, 40));
        assert_eq!(session.viewport().width, 98);
        assert_eq!(session.viewport().height, 36);
    }

    #[test]
    fn tabs_render_as_spaces() {
        let mut session = EditorSession::new("a\tbc");
        session.resize(80, 24);
        assert_eq!(session.visible_lines()[0], "a    bc");
        assert!(!session.visible_lines()[0].contains('\t'));
        assert_eq!(session.cursor_offset(), (7, 0));

        assert_eq!(clip_line("a\tb", 3, 4), "  b");
    }

    #[test]
    fn clip_line_drops_straddling_wide_chars() {
        assert_eq!(clip_line("abcdef", 2, 3), "cde");
        assert_eq!(clip_line("a漢b", 2, 2), "b");
        assert_eq!(clip_line("short", 10, 5), "");
    }
}
