//! # CLI Layer
//!
//! This module is **one possible UI client** for p, not the application
//! itself. It is the only place in the codebase that:
//! - Knows about stdout and stderr
//! - Handles argument parsing
//! - Formats output for human consumption
//! - Chooses which editor captures content
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_logging()`: Installs the tracing subscriber
//! - `handle_*()`: Per-command handlers that call the API and print results

use super::render::{print_messages, render_config, render_prompt, render_prompt_list};
use super::setup::{get_version, Cli, Commands};
use clap::Parser;
use colored::Colorize;
use p::commands::config::ConfigAction;
use p::commands::CmdMessage;
use p::editor::EditorChoice;
use p::error::Result;
use p::init::{initialize, PromptContext};
use p::picker;
use p::tags::{TagFilter, TagMatch};
use std::path::Path;
use tracing::Level;

/// Logs go to stderr; `-v` raises the level from WARN to DEBUG.
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Needs neither the store nor the config.
    if let Commands::Version = cli.command {
        println!("p version {}", get_version());
        return Ok(());
    }

    let mut ctx = initialize()?;
    tracing::debug!(dir = %ctx.api.paths().config_dir.display(), "context ready");

    match cli.command {
        Commands::Add {
            name,
            tags,
            external,
        } => handle_add(&mut ctx, &name, &tags, external),
        Commands::Edit {
            name,
            tags,
            external,
        } => handle_edit(&mut ctx, &name, tags.as_deref(), external),
        Commands::Delete { name } => handle_delete(&mut ctx, &name),
        Commands::List { tags, all_tags } => handle_list(&ctx, tags.as_deref(), all_tags),
        Commands::Search { query } => handle_search(&ctx, query.as_deref().unwrap_or("")),
        Commands::Export { file } => handle_export(&ctx, &file),
        Commands::Import { file } => handle_import(&mut ctx, &file),
        Commands::Backup { file } => handle_backup(&ctx, &file),
        Commands::Restore { file } => handle_restore(&mut ctx, &file),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
        Commands::Version => Ok(()),
    }
}

fn choose_editor(ctx: &PromptContext, external: bool) -> EditorChoice {
    let editor = EditorChoice::select(external, &ctx.config);
    if editor.is_external() {
        println!("{}", "Launching external editor...".dimmed());
    }
    editor
}

fn handle_add(ctx: &mut PromptContext, name: &str, tags: &str, external: bool) -> Result<()> {
    let mut editor = choose_editor(ctx, external);
    let result = ctx.api.add_prompt(&mut editor, name, tags)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut PromptContext,
    name: &str,
    tags: Option<&str>,
    external: bool,
) -> Result<()> {
    let mut editor = choose_editor(ctx, external);
    let result = ctx.api.edit_prompt(&mut editor, name, tags)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut PromptContext, name: &str) -> Result<()> {
    let result = ctx.api.delete_prompt(name)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &PromptContext, tags: Option<&str>, all_tags: bool) -> Result<()> {
    let filter = tags.map(|raw| {
        let mut filter = TagFilter::parse(raw);
        if all_tags {
            filter.mode = TagMatch::All;
        }
        filter
    });
    let result = ctx.api.list_prompts(filter.as_ref())?;
    print!("{}", render_prompt_list(&result.listed_prompts));
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &PromptContext, query: &str) -> Result<()> {
    let result = ctx.api.search_prompts("")?;
    if result.listed_prompts.is_empty() {
        print_messages(&result.messages);
        return Ok(());
    }

    match picker::pick(&result.listed_prompts, query)? {
        Some(prompt) => print!("{}", render_prompt(&prompt)),
        None => print_messages(&[CmdMessage::info("No prompt selected.")]),
    }
    Ok(())
}

fn handle_export(ctx: &PromptContext, file: &Path) -> Result<()> {
    let result = ctx.api.export_prompts(file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(ctx: &mut PromptContext, file: &Path) -> Result<()> {
    let result = ctx.api.import_prompts(file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_backup(ctx: &PromptContext, file: &Path) -> Result<()> {
    let result = ctx.api.backup(file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_restore(ctx: &mut PromptContext, file: &Path) -> Result<()> {
    let result = ctx.api.restore(file)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &PromptContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print!("{}", render_config(config));
    }
    print_messages(&result.messages);
    Ok(())
}
