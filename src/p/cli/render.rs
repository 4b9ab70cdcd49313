//! # Rendering
//!
//! Turns command results into terminal text. Every `render_*` function
//! returns a `String`; the `print_*` wrappers write it to stdout. Colors come
//! from `colored` and follow its terminal and `NO_COLOR` detection, while the
//! `*_internal` variants take the decision explicitly so tests see plain text.

use colored::{ColoredString, Colorize};
use p::commands::{CmdMessage, MessageLevel};
use p::config::{PromptConfig, CONFIG_KEYS};
use p::model::Prompt;

pub const RECORD_SEPARATOR: &str = "---";

fn color_enabled() -> bool {
    colored::control::SHOULD_COLORIZE.should_colorize()
}

fn paint(text: &str, use_color: bool, style: fn(&str) -> ColoredString) -> String {
    if use_color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn label(text: &str) -> ColoredString {
    text.bold()
}

/// One prompt in the `Name / Prompt / Tags / ---` record format.
pub fn render_prompt(prompt: &Prompt) -> String {
    render_prompt_internal(prompt, color_enabled())
}

fn render_prompt_internal(prompt: &Prompt, use_color: bool) -> String {
    format!(
        "{} {}\n{} {}\n{} {}\n{}\n",
        paint("Name:", use_color, label),
        prompt.name,
        paint("Prompt:", use_color, label),
        prompt.content,
        paint("Tags:", use_color, label),
        prompt.tags,
        paint(RECORD_SEPARATOR, use_color, |s| s.dimmed()),
    )
}

pub fn render_prompt_list(prompts: &[Prompt]) -> String {
    render_prompt_list_internal(prompts, color_enabled())
}

fn render_prompt_list_internal(prompts: &[Prompt], use_color: bool) -> String {
    prompts
        .iter()
        .map(|p| render_prompt_internal(p, use_color))
        .collect()
}

pub fn render_config(config: &PromptConfig) -> String {
    render_config_internal(config, color_enabled())
}

fn render_config_internal(config: &PromptConfig, use_color: bool) -> String {
    CONFIG_KEYS
        .iter()
        .map(|key| {
            let value = config.get(key).unwrap_or_default();
            let value = if value.is_empty() {
                paint("(unset)", use_color, |s| s.dimmed())
            } else {
                value
            };
            format!("{} = {}\n", paint(key, use_color, |s| s.cyan()), value)
        })
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    render_messages_internal(messages, color_enabled())
}

fn render_messages_internal(messages: &[CmdMessage], use_color: bool) -> String {
    messages
        .iter()
        .map(|m| {
            let style: fn(&str) -> ColoredString = match m.level {
                MessageLevel::Info => |s| s.dimmed(),
                MessageLevel::Success => |s| s.green(),
                MessageLevel::Warning => |s| s.yellow(),
                MessageLevel::Error => |s| s.red(),
            };
            format!("{}\n", paint(&m.content, use_color, style))
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}
