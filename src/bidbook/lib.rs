//! # Bidbook Architecture
//!
//! Bidbook is a **UI-agnostic reference browser** for the Uma + PS bridge bidding system.
//! It is a library that happens to ship a terminal client, not a terminal program with
//! some library code attached.
//!
//! The system document (sections, bid sequences, convention definitions) is loaded once,
//! then browsed through a two-panel, stack-based navigator. Every piece of display text
//! passes through the notation converter (`1c` → `1♣`) and the link substitution pass
//! that turns cross-reference text into followable spans.
//!
//! ## The Layers
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
//! │  Dispatch + API Layer (dispatch.rs, api.rs)                 │
//! │  - Actions and key bindings → facade methods                │
//! │  - Owns the application state                               │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per operation                                 │
//! │  - Operates on Rust types, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (navigation, render, search, notation, editor)        │
//! │  - Navigator state machine and smart titles                 │
//! │  - DisplayTree rendering, substring search                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DocumentSource trait: file, HTTP, embedded               │
//! │  - ContentStore: load with fallback, import, export         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`, [`render::DisplayTree`])
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! Rendering produces a tree of roles (opener cell, green reference, notice), never
//! colors. The terminal client maps roles to styles; another client could map them to
//! widgets.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests next to the code, using the sample document in
//!    [`store::fixtures`]. This is where most testing lives.
//! 2. **API and dispatch**: tests that actions reach the right command.
//! 3. **CLI**: `tests/` drives the binary with `assert_cmd`, pointing it at a fixture
//!    document with `--source` and an isolated `BIDBOOK_HOME`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`dispatch`]: Actions, key bindings and the dispatch table
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Document sources and the content store
//! - [`model`]: Document schema (sections, sequences, definitions)
//! - [`render`]: Records → display trees
//! - [`navigation`]: Panel stack state machine and smart titles
//! - [`search`]: Section search with snippets
//! - [`notation`]: Shorthand → suit symbol conversion
//! - [`editor`]: Draft model and external editor integration
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and templated terminal rendering for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod editor;
pub mod error;
pub mod model;
pub mod navigation;
pub mod notation;
pub mod render;
pub mod search;
pub mod store;
