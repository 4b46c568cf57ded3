//! Terminal front-end for Pocket Notes.
//!
//! # Responsibility
//! - Resolve database path and logging settings from flags/environment.
//! - Drive `NotesApp` actions and print the rendered view.

use clap::{Parser, Subcommand};
use log::info;
use pocket_notes_core::db::open_db;
use pocket_notes_core::{
    core_version, default_log_level, distinct_tags, init_logging, render_text, NotesApp,
    SqliteStorage,
};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use uuid::Uuid;

const DEFAULT_DB_FILE_NAME: &str = "pocket-notes.sqlite3";
const ENV_LOG_DIR: &str = "POCKET_NOTES_LOG_DIR";
const ENV_LOG_LEVEL: &str = "POCKET_NOTES_LOG_LEVEL";

#[derive(Debug, Parser)]
#[command(
    name = "pocket-notes",
    about = "Tagged notes kept in a local SQLite slot database",
    version = core_version()
)]
struct Cli {
    /// Slot database file.
    #[arg(
        long,
        global = true,
        env = "POCKET_NOTES_DB",
        value_name = "PATH",
        default_value = DEFAULT_DB_FILE_NAME
    )]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Add a note
    Add {
        #[arg(value_name = "TEXT")]
        text: String,

        /// Comma or space separated tags, `#` optional
        #[arg(short, long, value_name = "TAGS", default_value = "")]
        tags: String,
    },
    /// Delete a note by id
    Delete {
        #[arg(value_name = "ID")]
        id: Uuid,
    },
    /// List notes, newest first
    List {
        /// Case-insensitive text filter
        #[arg(short, long, value_name = "QUERY", default_value = "")]
        search: String,

        /// Only notes carrying this tag
        #[arg(long, value_name = "TAG")]
        tag: Option<String>,
    },
    /// Print the tag vocabulary
    Tags,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::Delete { .. } => "delete",
            Self::List { .. } => "list",
            Self::Tags => "tags",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging_from_env();
    info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.name()
    );

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("error: cannot open `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };
    let storage = match SqliteStorage::try_new(&conn) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = NotesApp::open(storage);
    match cli.command {
        Commands::Add { text, tags } => match app.submit(&text, &tags) {
            Some(id) => println!("added {id}"),
            None => println!("nothing added: note text is empty"),
        },
        Commands::Delete { id } => {
            if app.delete(id) {
                println!("deleted {id}");
            } else {
                println!("no note with id {id}");
            }
        }
        Commands::List { search, tag } => {
            app.search(&search);
            if let Some(tag) = tag {
                app.click_tag(&tag);
            }
            print!("{}", render_text(app.view()));
        }
        Commands::Tags => {
            for tag in distinct_tags(&app.state().notes) {
                println!("#{tag}");
            }
        }
    }
    ExitCode::SUCCESS
}

fn init_logging_from_env() {
    let Ok(log_dir) = env::var(ENV_LOG_DIR) else {
        return;
    };
    let level = env::var(ENV_LOG_LEVEL)
        .unwrap_or_else(|_| default_log_level().as_str().to_string());
    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }
}
