//! # todo - a file-backed to-do list
//!
//! A single-user task list with an interactive terminal interface and a
//! small CLI for scripted use.
//!
//! ## Key Features
//!
//! - **Interactive TUI**: add, complete, edit, and delete tasks from one
//!   full-screen view with a modal edit dialog.
//! - **Plain JSON Storage**: the whole list lives in one `tasks.json`
//!   file, rewritten after every change, so state survives restarts and
//!   the file stays hand-readable.
//! - **Stable IDs**: every task gets a sequential integer id that is never
//!   reused within a session, even across deletes.
//! - **CLI Automation**: every UI action is also a subcommand, so tasks
//!   can be driven from scripts and shell aliases.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI (the default)
//! todo
//!
//! # Or drive the list from the shell
//! todo add "Buy milk"
//! todo list
//! todo complete 1
//! todo edit 1 "Buy oat milk"
//! todo delete 1
//! ```
//!
//! Data is stored in `tasks.json` in the working directory; pass
//! `--db <path>` to use another file. A file that exists but cannot be
//! parsed aborts startup rather than silently starting fresh.

use std::path::PathBuf;

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use store::TaskStore;

fn main() {
    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(|| PathBuf::from("tasks.json"));
    let command = cli.command.unwrap_or(Commands::Ui);

    // The UI owns its store; completions never touch one.
    match &command {
        Commands::Ui => {
            cmd_ui(&db_path);
            return;
        }
        Commands::Completions { shell } => {
            cmd_completions(*shell);
            return;
        }
        _ => {}
    }

    let mut store = match TaskStore::load(&db_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", db_path.display());
            std::process::exit(1);
        }
    };

    match command {
        Commands::Ui | Commands::Completions { .. } => unreachable!("handled above"),
        Commands::Add { title } => cmd_add(&mut store, title),
        Commands::List => cmd_list(&store),
        Commands::Complete { id } => cmd_complete(&mut store, id),
        Commands::Reopen { id } => cmd_reopen(&mut store, id),
        Commands::Edit { id, title } => cmd_edit(&mut store, id, title),
        Commands::Delete { id } => cmd_delete(&mut store, id),
    }
}
