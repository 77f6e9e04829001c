//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs the log subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Structure
//!
//! - `run()`: Main dispatch logic (called by `main.rs`)
//! - `init_context()`: Builds `AppContext` with the API, the loaded document and color settings
//! - `handle_*()`: Per-command handlers that call the API and print the result
//! - `browse()`: The interactive loop over the library's dispatch table

use super::render::{
    render_messages, render_panels, render_search_hits, render_text_list, render_toc,
};
use super::setup::{Cli, Commands};
use bidbook::api::{BidbookApi, CmdMessage, CmdResult, ConfigAction};
use bidbook::commands::BidbookPaths;
use bidbook::config::BidbookConfig;
use bidbook::dispatch::{dispatch, key_binding, Action, Key, Outcome};
use bidbook::editor::{edit_draft, DraftKind};
use bidbook::error::{BidbookError, Result};
use bidbook::navigation::PanelSlot;
use bidbook::store::{source_for, DocumentSource};
use chrono::Utc;
use clap::Parser;
use console::Term;
use directories::ProjectDirs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "bidbook>";

/// Browse commands, as shown by `help`.
const BROWSE_HELP: &[(&str, &str)] = &[
    ("toc", "Table of contents"),
    ("show ID", "Open a section"),
    ("follow N | N", "Follow reference [N]"),
    ("seq ID", "Open a sequence in the side panel"),
    ("def ID", "Open a definition"),
    ("close", "Close the side panel"),
    ("closedef", "Close the definition"),
    ("back", "Back to the start"),
    ("/QUERY", "Search sections"),
    ("edit [KIND]", "Draft a section or definition in $EDITOR"),
    ("note c|d|h|s|nt", "Insert a suit symbol into the draft"),
    ("cursor N", "Move the draft cursor to position N"),
    ("save", "Save the draft or pending changes"),
    ("cancel", "Discard the draft"),
    ("import PATH", "Merge a JSON file into the document"),
    ("export [PATH]", "Write the document as JSON"),
    ("quit", "Leave"),
];

struct AppContext {
    api: BidbookApi<Box<dyn DocumentSource>>,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Toc) | None => handle_toc(&ctx),
        Some(Commands::Show { id }) => handle_show(&mut ctx, &id),
        Some(Commands::Sequence { id }) => handle_sequence(&mut ctx, &id),
        Some(Commands::Definition { id }) => handle_definition(&mut ctx, &id),
        Some(Commands::Search { query }) => handle_search(&mut ctx, &query.join(" ")),
        Some(Commands::Browse { id }) => browse(&mut ctx, id),
        Some(Commands::Export { path }) => handle_export(&ctx, path),
        Some(Commands::Import { path, output }) => handle_import(&mut ctx, &path, output),
        Some(Commands::Edit { kind }) => handle_edit(&mut ctx, &kind),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
    }
}

/// Logs go to stderr. `--verbose` wins over `BIDBOOK_LOG`, which wins over `RUST_LOG`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        std::env::var("BIDBOOK_LOG")
            .ok()
            .and_then(|value| EnvFilter::try_new(value).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os("BIDBOOK_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "bidbook", "bidbook")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BidbookError::Config("Could not determine config directory".to_string()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = BidbookConfig::load(&config_dir)?;
    let location = cli.source.clone().or_else(|| config.source.clone());
    let source = source_for(location.as_deref());
    debug!(source = %source.describe(), config = %config_dir.display(), "starting");

    let mut api = BidbookApi::new(source, config, BidbookPaths { config_dir });
    let loaded = api.load();

    let use_color = !cli.no_color && Term::stdout().features().colors_supported();
    // Load warnings go to stderr so `export -` output stays clean.
    eprint!("{}", render_messages(&loaded.messages, use_color));

    Ok(AppContext { api, use_color })
}

/// Prints the messages that have not outlived their display time.
fn print_messages(ctx: &AppContext, messages: &[CmdMessage]) {
    let now = Utc::now();
    let live: Vec<CmdMessage> = messages
        .iter()
        .filter(|message| !message.is_expired(now))
        .cloned()
        .collect();
    print!("{}", render_messages(&live, ctx.use_color));
}

/// Prints whatever a result carries, in a fixed order.
fn print_result(ctx: &AppContext, result: &CmdResult) {
    if !result.toc.is_empty() {
        print!("{}", render_toc(&result.toc, ctx.use_color));
    }
    if !result.search_hits.is_empty() {
        print!("{}", render_search_hits(&result.search_hits, ctx.use_color));
        println!();
    }
    if !result.panels.is_empty() {
        print!(
            "{}",
            render_panels(&result.panels, &result.breadcrumbs, ctx.use_color)
        );
    }
    if let Some(config) = &result.config {
        let lines: Vec<String> = config
            .entries()
            .into_iter()
            .map(|(key, value)| format!("{} = {}", key, value))
            .collect();
        print!(
            "{}",
            render_text_list(&lines, "No configuration values.", ctx.use_color)
        );
    }
    if let Some(json) = &result.exported {
        println!("{}", json);
    }
    print_messages(ctx, &result.messages);
}

/// Prints only the panels in `slot`, for the one-shot commands that open a single panel.
fn print_slot(ctx: &AppContext, result: &CmdResult, slot: PanelSlot) {
    let panels: Vec<_> = result
        .panels
        .iter()
        .filter(|panel| panel.slot == slot)
        .cloned()
        .collect();
    print!("{}", render_panels(&panels, &[], ctx.use_color));
    print_messages(ctx, &result.messages);
}

fn handle_toc(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.toc();
    if result.toc.is_empty() {
        print!("{}", render_toc(&[], ctx.use_color));
    }
    print_result(ctx, &result);
    Ok(())
}

fn handle_show(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.show_section(id);
    print_result(ctx, &result);
    Ok(())
}

fn handle_sequence(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.open_sequence(id);
    print_slot(ctx, &result, PanelSlot::Secondary);
    Ok(())
}

fn handle_definition(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.open_definition(id);
    print_slot(ctx, &result, PanelSlot::Overlay);
    Ok(())
}

fn handle_search(ctx: &mut AppContext, query: &str) -> Result<()> {
    let result = ctx.api.search(query);
    print_result(ctx, &result);
    Ok(())
}

fn handle_export(ctx: &AppContext, path: Option<String>) -> Result<()> {
    let result = ctx.api.export(path.as_deref().map(Path::new))?;
    print_result(ctx, &result);
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: &str, output: Option<String>) -> Result<()> {
    let result = ctx.api.import_file(Path::new(path))?;
    print_messages(ctx, &result.messages);
    if let Some(output) = output {
        let exported = ctx.api.export(Some(Path::new(&output)))?;
        print_result(ctx, &exported);
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, kind: &str) -> Result<()> {
    let kind: DraftKind = kind.parse()?;
    let opened = ctx.api.open_editor(kind);
    print_messages(ctx, &opened.messages);
    edit_in_editor(ctx)?;
    let saved = ctx.api.save_editor()?;
    print_messages(ctx, &saved.messages);
    Ok(())
}

/// Sends the open draft through `$EDITOR` and stores what comes back.
fn edit_in_editor(ctx: &mut AppContext) -> Result<()> {
    let Some(draft) = ctx.api.state().draft.clone() else {
        return Ok(());
    };
    let edited = edit_draft(&draft)?;
    let result = ctx.api.update_draft(edited)?;
    print_messages(ctx, &result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = ctx.api.config(action)?;
    print_result(ctx, &result);
    Ok(())
}

fn browse_help() -> Vec<String> {
    let mut lines: Vec<String> = BROWSE_HELP
        .iter()
        .map(|(command, about)| format!("  {:<18} {}", command, about))
        .collect();
    lines.push(String::new());
    for key in Key::ALL {
        lines.push(format!("  {:<18} {:?}", key.label(), key_binding(key)));
    }
    lines
}

/// ^F: the next line is taken as a search query.
fn search_prompt(ctx: &mut AppContext, interactive: bool) -> Result<()> {
    if interactive {
        print!("search: ");
        io::stdout().flush()?;
    }
    let mut query = String::new();
    io::stdin().lock().read_line(&mut query)?;
    let result = ctx.api.search(query.trim());
    print_result(ctx, &result);
    Ok(())
}

fn browse(ctx: &mut AppContext, start: Option<String>) -> Result<()> {
    match start {
        Some(id) => handle_show(ctx, &id)?,
        None => handle_toc(ctx)?,
    }

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut line = String::new();
    loop {
        if interactive {
            print!("{} ", PROMPT);
            io::stdout().flush()?;
        }
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let action = match line.parse::<Action>() {
            Ok(action) => action,
            Err(e) => {
                print_messages(ctx, &[CmdMessage::error(e.to_string())]);
                continue;
            }
        };
        let opens_editor = matches!(action, Action::OpenEditor(_));
        let focuses_search = action == Action::FocusSearch;

        match dispatch(&mut ctx.api, action) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Help) => {
                print!("{}", render_text_list(&browse_help(), "", ctx.use_color));
            }
            Ok(Outcome::Continue(result)) => {
                print_result(ctx, &result);
                let followup = if opens_editor {
                    edit_in_editor(ctx)
                } else if focuses_search {
                    search_prompt(ctx, interactive)
                } else {
                    Ok(())
                };
                if let Err(e) = followup {
                    print_messages(ctx, &[CmdMessage::error(e.to_string())]);
                }
            }
            Err(e) => print_messages(ctx, &[CmdMessage::error(e.to_string())]),
        }
    }
    Ok(())
}
