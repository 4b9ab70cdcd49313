//! # p Architecture
//!
//! `p` is a small stash for reusable LLM prompts: named snippets of text with
//! a free-form tag list, kept in a local SQLite file. The binary is a thin CLI
//! client; everything it does goes through the library API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the store, returns structured Result types          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, tag normalization, editor orchestration      │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract PromptStore trait                               │
//! │  - SqliteStore (production), InMemoryStore (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Content capture sits beside the command layer: commands receive a
//! [`editor::ContentEditor`] and never care whether it is the built-in
//! terminal editor or the user's `$EDITOR`.
//!
//! ## The Terminal Editor
//!
//! The interesting part of the crate is [`editor`]: a single-buffer,
//! modeless text area. Its key handling is a plain function from
//! `(session, event)` to `Option<SessionExit>`, so the whole binding table is
//! unit tested without a terminal. Only [`editor::terminal`] touches the TTY.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: The `Prompt` record
//! - [`tags`]: Tag normalization and tag filters
//! - [`validation`]: Name/content limits
//! - [`editor`]: Terminal editor and external editor adapter
//! - [`picker`]: Interactive fuzzy selector used by `search`
//! - [`config`]: Persistent settings
//! - [`init`]: Path resolution and context wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod init;
pub mod model;
pub mod picker;
pub mod store;
pub mod tags;
pub mod validation;
