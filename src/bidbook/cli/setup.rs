use clap::{Parser, Subcommand};

/// Returns the version string, with git hash and commit date when built from a checkout.
/// Format: "0.3.2" without git, "0.3.2@abc1234 2024-01-15 14:30" otherwise.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "bidbook", bin_name = "bidbook", version = get_version())]
#[command(about = "Reference browser for the Uma + PS bridge bidding system", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Document to load: a file path or an http(s) URL (overrides the configured source)
    #[arg(short, long, global = true, value_name = "PATH|URL")]
    pub source: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the sections of the system
    #[command(display_order = 1)]
    Toc,

    /// Show a section
    #[command(alias = "s", display_order = 2)]
    Show {
        /// Section id (e.g. 1c-opening)
        id: String,
    },

    /// Show a bid sequence
    #[command(alias = "seq", display_order = 3)]
    Sequence {
        /// Sequence id (e.g. 1c-1d-rebids)
        id: String,
    },

    /// Show a convention definition
    #[command(alias = "def", display_order = 4)]
    Definition {
        /// Definition id (e.g. walsh)
        id: String,
    },

    /// Search section titles and text
    #[command(display_order = 5)]
    Search {
        /// Search terms (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Browse interactively, one action per line
    #[command(alias = "b", display_order = 6)]
    Browse {
        /// Section to open first
        id: Option<String>,
    },

    /// Write the document as JSON (use - for stdout)
    #[command(display_order = 10)]
    Export {
        /// Output path (defaults to the export_file setting)
        path: Option<String>,
    },

    /// Merge a JSON file into the document and print the result
    #[command(display_order = 11)]
    Import {
        /// JSON file to merge
        path: String,

        /// Also write the merged document to this path (use - for stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Draft a new section or definition in $EDITOR
    #[command(display_order = 12)]
    Edit {
        /// What to add: section or definition
        #[arg(default_value = "section")]
        kind: String,
    },

    /// Get or set configuration
    #[command(display_order = 20)]
    Config {
        /// Configuration key (e.g. title_limit)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("bidbook").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn no_command_is_allowed() {
        assert!(parse(&[]).command.is_none());
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = parse(&["show", "1c-opening", "--source", "doc.json", "--no-color"]);
        assert_eq!(cli.source.as_deref(), Some("doc.json"));
        assert!(cli.no_color);
        assert!(matches!(cli.command, Some(Commands::Show { id }) if id == "1c-opening"));
    }

    #[test]
    fn search_joins_words() {
        let cli = parse(&["search", "strong", "club"]);
        match cli.command {
            Some(Commands::Search { query }) => assert_eq!(query.join(" "), "strong club"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn aliases_resolve() {
        assert!(matches!(parse(&["seq", "x"]).command, Some(Commands::Sequence { .. })));
        assert!(matches!(parse(&["def", "x"]).command, Some(Commands::Definition { .. })));
    }

    #[test]
    fn edit_defaults_to_section() {
        assert!(matches!(parse(&["edit"]).command, Some(Commands::Edit { kind }) if kind == "section"));
    }

    #[test]
    fn search_requires_terms() {
        assert!(Cli::try_parse_from(["bidbook", "search"]).is_err());
    }
}
