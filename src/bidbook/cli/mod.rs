//! # CLI Behavior
//!
//! This is **one possible UI client** for bidbook, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! For the overall architecture, see the crate-level documentation of the `bidbook` library.
//!
//! ## One-shot commands
//!
//! Each subcommand loads the document, performs one operation and prints the result:
//!
//! - `bidbook` (no command): the table of contents
//! - `bidbook show 1c-opening`: a section, with its cross-references numbered
//! - `bidbook sequence 1c-1d-rebids`, `bidbook definition walsh`
//! - `bidbook search strong club`: hits with snippets, then the first hit opened
//! - `bidbook export [path|-]`, `bidbook import file.json`
//! - `bidbook edit section|definition`: a draft round trip through `$EDITOR`
//! - `bidbook config [key] [value]`
//!
//! ## Browse
//!
//! `bidbook browse` keeps the navigator alive and reads one action per line
//! (`show ID`, `follow N` or just `N`, `back`, `esc`, `/query`, `^E`, …). Each line
//! goes through the library's dispatch table, so the browse loop holds no navigation
//! logic of its own.
//!
//! ## Document source
//!
//! `--source` (or the `source` config key) names a file or an `http(s)://` URL. Without
//! one, or when loading fails, the embedded document is used; a failed load prints a
//! warning on stderr and carries on.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, per-command handlers and the browse loop
//! - `render`: Output formatting (panels, tables, toc, messages)
//! - `setup`: Argument parsing via clap
//! - `styles`: Semantic style names and the theme
//! - `templates`: Output templates
//! - `theme`: The `style` template filter and color handling

mod commands;
mod render;
pub mod setup;
mod styles;
mod templates;
mod theme;

pub use commands::run;
