//! # Bidbook CLI
//!
//! The binary is intentionally thin: the terminal client lives in `cli/`, and this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/bidbook/cli/)                               │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring, handlers, browse loop (commands.rs)      │
//! │  - Terminal rendering via minijinja templates (render.rs)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (bidbook::api, bidbook::dispatch)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in the library is UI agnostic. The CLI layer owns every user-facing
//! concern: argument parsing, context initialization, logging setup, rendering and
//! exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
