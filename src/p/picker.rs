//! Interactive fuzzy selector used by `p search`.
//!
//! Same split as the editor: [`Picker::step`] is a pure transition over
//! terminal events, and [`pick`] owns the terminal and the draw loop.

use crate::commands::search::rank;
use crate::editor::terminal::{unavailable, TerminalGuard};
use crate::error::Result;
use crate::model::Prompt;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const ACCENT: Color = Color::Indexed(205);
const PROMPT_MARKER: &str = "> ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerExit {
    /// Index into the picker's prompt slice.
    Selected(usize),
    Aborted,
}

pub struct Picker<'a> {
    prompts: &'a [Prompt],
    query: String,
    matches: Vec<usize>,
    selected: usize,
}

impl<'a> Picker<'a> {
    pub fn new(prompts: &'a [Prompt], query: &str) -> Self {
        let mut picker = Self {
            prompts,
            query: query.to_string(),
            matches: Vec::new(),
            selected: 0,
        };
        picker.refresh();
        picker
    }

    fn refresh(&mut self) {
        self.matches = rank(self.prompts, &self.query);
        self.selected = 0;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Matching prompts, best first.
    pub fn matches(&self) -> impl Iterator<Item = &'a Prompt> + '_ {
        let prompts = self.prompts;
        self.matches.iter().map(move |&i| &prompts[i])
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Position of the highlighted row within the matches.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> Option<&'a Prompt> {
        let prompts = self.prompts;
        self.matches.get(self.selected).map(|&i| &prompts[i])
    }

    pub fn step(&mut self, event: &Event) -> Option<PickerExit> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                let flat: String = text.chars().filter(|c| !c.is_control()).collect();
                self.query.push_str(&flat);
                self.refresh();
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) -> Option<PickerExit> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => return Some(PickerExit::Aborted),
            KeyCode::Char('c') if ctrl => return Some(PickerExit::Aborted),
            KeyCode::Enter => {
                if let Some(&index) = self.matches.get(self.selected) {
                    return Some(PickerExit::Selected(index));
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('p') if ctrl => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Char('n') if ctrl => self.move_selection(1),
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refresh();
                }
            }
            KeyCode::Char(ch) if !ctrl && !alt => {
                self.query.push(ch);
                self.refresh();
            }
            _ => {}
        }
        None
    }

    fn move_selection(&mut self, delta: isize) {
        if self.matches.is_empty() {
            return;
        }
        let last = self.matches.len() - 1;
        self.selected = match delta {
            d if d < 0 => self.selected.saturating_sub(1),
            _ => (self.selected + 1).min(last),
        };
    }
}

/// Runs the selector on the terminal. `Ok(None)` means the user aborted.
pub fn pick(prompts: &[Prompt], query: &str) -> Result<Option<Prompt>> {
    let mut guard = TerminalGuard::acquire()?;
    let mut picker = Picker::new(prompts, query);

    loop {
        guard
            .terminal()
            .draw(|frame| render(frame, &picker))
            .map_err(unavailable)?;
        let event = event::read().map_err(unavailable)?;
        match picker.step(&event) {
            Some(PickerExit::Selected(index)) => return Ok(prompts.get(index).cloned()),
            Some(PickerExit::Aborted) => return Ok(None),
            None => {}
        }
    }
}

fn preview_lines(prompt: &Prompt) -> Vec<Line<'_>> {
    let label = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name: ", label),
            Span::raw(prompt.name.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Tags: ", label),
            Span::raw(prompt.tags.as_str()),
        ]),
        Line::from(Span::styled("Prompt:", label)),
    ];
    lines.extend(prompt.content.lines().map(Line::raw));
    lines
}

fn render(frame: &mut Frame, picker: &Picker) {
    let [query_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(frame.area());
    let [list_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(PROMPT_MARKER, Style::default().fg(ACCENT)),
            Span::raw(picker.query()),
        ])),
        query_area,
    );
    let cursor_x = (PROMPT_MARKER.width() + picker.query().width()) as u16;
    frame.set_cursor_position((query_area.x + cursor_x.min(query_area.width), query_area.y));

    let items: Vec<ListItem> = picker
        .matches()
        .map(|p| ListItem::new(p.name.as_str()))
        .collect();
    let list = List::new(items)
        .block(Block::bordered().title(format!(
            " {}/{} ",
            picker.match_count(),
            picker.prompts.len()
        )))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(picker.current().map(|_| picker.selected()));
    frame.render_stateful_widget(list, list_area, &mut state);

    let preview = match picker.current() {
        Some(prompt) => Paragraph::new(preview_lines(prompt)),
        None => Paragraph::new(Line::styled(
            "No matches",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    frame.render_widget(
        preview
            .block(Block::bordered().title(" preview "))
            .wrap(Wrap { trim: false }),
        preview_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(ch: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
    }

    fn sample() -> Vec<Prompt> {
        vec![
            Prompt::new(1, "code-review", "Review this diff", "code"),
            Prompt::new(2, "greeting", "Hi there", "a,b"),
            Prompt::new(3, "grammar-fix", "Fix the grammar", ""),
        ]
    }

    #[test]
    fn typing_narrows_and_enter_selects() {
        let prompts = sample();
        let mut picker = Picker::new(&prompts, "");
        assert_eq!(picker.match_count(), 3);

        for ch in "gre".chars() {
            assert_eq!(picker.step(&key(KeyCode::Char(ch))), None);
        }
        assert_eq!(picker.current().map(|p| p.name.as_str()), Some("greeting"));
        assert_eq!(picker.step(&key(KeyCode::Enter)), Some(PickerExit::Selected(1)));
    }

    #[test]
    fn navigation_is_clamped() {
        let prompts = sample();
        let mut picker = Picker::new(&prompts, "");
        picker.step(&key(KeyCode::Up));
        assert_eq!(picker.selected(), 0);
        for _ in 0..5 {
            picker.step(&ctrl('n'));
        }
        assert_eq!(picker.selected(), 2);
        picker.step(&ctrl('p'));
        assert_eq!(picker.selected(), 1);
    }

    #[test]
    fn query_edits_reset_selection() {
        let prompts = sample();
        let mut picker = Picker::new(&prompts, "g");
        picker.step(&key(KeyCode::Down));
        assert_eq!(picker.selected(), 1);
        picker.step(&key(KeyCode::Backspace));
        assert_eq!(picker.query(), "");
        assert_eq!(picker.selected(), 0);
    }

    #[test]
    fn enter_without_matches_does_nothing() {
        let prompts = sample();
        let mut picker = Picker::new(&prompts, "zzz");
        assert_eq!(picker.match_count(), 0);
        assert_eq!(picker.step(&key(KeyCode::Enter)), None);
        assert_eq!(picker.step(&key(KeyCode::Esc)), Some(PickerExit::Aborted));
    }

    #[test]
    fn ctrl_c_aborts() {
        let prompts = sample();
        let mut picker = Picker::new(&prompts, "");
        assert_eq!(picker.step(&ctrl('c')), Some(PickerExit::Aborted));
    }

    #[test]
    fn paste_extends_query() {
        let prompts = sample();
        let mut picker = Picker::new(&prompts, "");
        picker.step(&Event::Paste("gram\n".into()));
        assert_eq!(picker.query(), "gram");
        assert_eq!(picker.current().map(|p| p.name.as_str()), Some("grammar-fix"));
    }

    #[test]
    fn renders_list_and_preview() {
        let prompts = sample();
        let picker = Picker::new(&prompts, "greet");
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        terminal.draw(|frame| render(frame, &picker)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("> greet"));
        assert!(screen.contains("1/3"));
        assert!(screen.contains("Name: greeting"));
        assert!(screen.contains("Hi there"));
    }
}
