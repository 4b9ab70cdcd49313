//! Terminal adapter for the built-in editor.
//!
//! Everything that touches the TTY lives here: raw mode, the alternate
//! screen, bracketed paste, drawing. [`TerminalGuard`] undoes all of it when
//! dropped, so the terminal is restored on submit, cancel, error, and panic
//! unwinding alike.

use super::session::{EditorSession, HEADER_ROWS};
use super::{ContentEditor, EditOutcome};
use crate::error::{PromptError, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};
use ratatui::{Frame, Terminal};
use std::io::{self, IsTerminal, Stdout};

pub const HELP_TEXT: &str =
    "Enter your prompt. Press Alt+Enter or Ctrl+D to save, Esc or Ctrl+C to cancel.";
pub const DEFAULT_PLACEHOLDER: &str = "Enter your prompt...";

const ACCENT: Color = Color::Indexed(205);

pub(crate) fn unavailable(err: io::Error) -> PromptError {
    PromptError::TerminalUnavailable(err.to_string())
}

/// Fails unless both stdin and stdout are attached to a terminal.
pub(crate) fn ensure_interactive() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        Ok(())
    } else {
        Err(PromptError::TerminalUnavailable(
            "stdin and stdout must be a terminal (use -e to edit in $EDITOR)".to_string(),
        ))
    }
}

fn restore_terminal(stdout: &mut Stdout) {
    let _ = disable_raw_mode();
    let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen);
}

/// Owns the terminal for the duration of a full-screen session.
pub(crate) struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    pub(crate) fn acquire() -> Result<Self> {
        ensure_interactive()?;
        enable_raw_mode().map_err(unavailable)?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste) {
            restore_terminal(&mut stdout);
            return Err(unavailable(e));
        }
        match Terminal::new(CrosstermBackend::new(io::stdout())) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                restore_terminal(&mut stdout);
                Err(unavailable(e))
            }
        }
    }

    pub(crate) fn terminal(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal(&mut io::stdout());
        let _ = self.terminal.show_cursor();
    }
}

/// The built-in full-screen editor.
#[derive(Debug, Clone)]
pub struct TerminalEditor {
    placeholder: String,
}

impl Default for TerminalEditor {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl TerminalEditor {
    /// Runs the editor until the user submits or cancels.
    pub fn run_interactive(&self, initial: &str) -> Result<EditOutcome> {
        let mut guard = TerminalGuard::acquire()?;
        let mut session = EditorSession::new(initial).with_placeholder(&self.placeholder);

        let size = guard.terminal().size().map_err(unavailable)?;
        session.resize(size.width, size.height);

        let exit = loop {
            guard
                .terminal()
                .draw(|frame| render(frame, &session))
                .map_err(unavailable)?;
            let event = event::read().map_err(unavailable)?;
            if let Some(exit) = session.step(&event) {
                break exit;
            }
        };
        // Logs go to stderr, which is only usable again once the screen is restored.
        drop(guard);
        tracing::debug!(?exit, "editor session finished");
        Ok(session.finish(exit))
    }
}

impl ContentEditor for TerminalEditor {
    fn edit(&mut self, initial: &str) -> Result<EditOutcome> {
        self.run_interactive(initial)
    }
}

fn render(frame: &mut Frame, session: &EditorSession) {
    let [header, body] =
        Layout::vertical([Constraint::Length(HEADER_ROWS), Constraint::Min(1)]).areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::styled(HELP_TEXT, Style::default().fg(ACCENT))),
        header,
    );

    let block = Block::bordered().border_style(Style::default().fg(ACCENT));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    let text = match session.placeholder() {
        Some(placeholder) => Paragraph::new(Line::styled(
            placeholder.to_string(),
            Style::default().add_modifier(Modifier::DIM),
        )),
        None => Paragraph::new(
            session
                .visible_lines()
                .into_iter()
                .map(Line::from)
                .collect::<Vec<_>>(),
        ),
    };
    frame.render_widget(text, inner);

    let (x, y) = session.cursor_offset();
    frame.set_cursor_position((inner.x + x, inner.y + y));
}
