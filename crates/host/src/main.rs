use anyhow::Result;
use clap::{Parser, Subcommand};

use codedrop::commands;

/// Filename-inference and save host for code blocks captured from chat
/// transcripts.
///
/// This CLI is a thin wrapper around `codedrop-core` (exposed in code as
/// `codedrop_core`). All substantive logic lives in the library so it can
/// be tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "codedrop",
    version,
    about = "Infer filenames for code blocks and save them under configured destinations",
    long_about = None
)]
struct Cli {
    /// Path to the store database. Defaults to the platform data directory.
    #[arg(long, global = true)]
    store: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage configured save destinations.
    Destinations {
        #[command(subcommand)]
        action: DestinationsCommand,
    },

    /// Inspect per-destination recent save paths.
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Infer a filename (and default relative path) for a block of code.
    ///
    /// Reads the code from --file, or from stdin when omitted.
    Suggest {
        /// File holding the code block. Omit to read stdin.
        #[arg(long)]
        file: Option<String>,

        /// Surrounding conversation text to mine for cues.
        #[arg(long, default_value = "")]
        context: String,

        /// Style/markup hint string (e.g. "language-rust hljs").
        #[arg(long)]
        hint: Option<String>,

        /// Explicit language tag (rs, py, ...). Overrides --hint.
        #[arg(long)]
        lang: Option<String>,

        /// Destination whose recent directory biases the suggested path.
        /// Defaults to the configured default destination.
        #[arg(long)]
        destination: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Save content under a configured destination and remember the path.
    Save {
        /// Destination id. Defaults to the configured default destination.
        #[arg(long)]
        destination: Option<String>,

        /// Path relative to the destination root (e.g. src/lib.rs).
        #[arg(long)]
        path: String,

        /// File holding the content. Omit to read stdin.
        #[arg(long)]
        file: Option<String>,
    },

    /// Check that the store is reachable and report basic info.
    Ping,

    /// Run the native-messaging host loop on stdin/stdout.
    Serve,
}

#[derive(Subcommand, Debug)]
enum DestinationsCommand {
    /// Register a new destination. The first one becomes the default.
    Add {
        /// Human-friendly display name.
        #[arg(long)]
        name: String,

        /// Absolute root directory files are saved under.
        #[arg(long)]
        root: String,
    },

    /// List all configured destinations.
    List {
        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Remove a destination (and its recent-path history).
    Remove {
        /// Destination id to remove.
        #[arg(long)]
        id: String,
    },

    /// Make a destination the default save target.
    SetDefault {
        /// Destination id to promote.
        #[arg(long)]
        id: String,
    },

    /// Export the registry as JSON (or YAML) for backup or sharing.
    Export {
        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<String>,

        /// Emit YAML instead of JSON.
        #[arg(long, default_value_t = false)]
        yaml: bool,
    },

    /// Import a registry export, replacing the current configuration.
    Import {
        /// File to import.
        file: String,

        /// Parse the file as YAML instead of JSON.
        #[arg(long, default_value_t = false)]
        yaml: bool,

        /// Replace an existing non-empty registry without complaint.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List recent save paths for one destination, most recent first.
    List {
        /// Destination id.
        #[arg(long)]
        destination: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    codedrop::init_logging();

    let cli = Cli::parse();
    let store = cli.store.as_deref();

    match cli.command {
        Command::Destinations { action } => match action {
            DestinationsCommand::Add { name, root } => {
                commands::add_destination_command(store, &name, &root)?
            }
            DestinationsCommand::List { json } => commands::list_destinations_command(store, json)?,
            DestinationsCommand::Remove { id } => commands::remove_destination_command(store, &id)?,
            DestinationsCommand::SetDefault { id } => commands::set_default_command(store, &id)?,
            DestinationsCommand::Export { output, yaml } => {
                commands::export_command(store, output.as_deref(), yaml)?
            }
            DestinationsCommand::Import { file, yaml, force } => {
                commands::import_command(store, &file, yaml, force)?
            }
        },
        Command::History { action } => match action {
            HistoryCommand::List { destination, json } => {
                commands::history_list_command(store, &destination, json)?
            }
        },
        Command::Suggest { file, context, hint, lang, destination, json } => {
            commands::suggest_command(
                store,
                file.as_deref(),
                &context,
                hint.as_deref(),
                lang.as_deref(),
                destination.as_deref(),
                json,
            )?
        }
        Command::Save { destination, path, file } => {
            commands::save_command(store, destination.as_deref(), &path, file.as_deref())?
        }
        Command::Ping => commands::ping_command(store)?,
        Command::Serve => commands::serve_command(store)?,
    }

    Ok(())
}
