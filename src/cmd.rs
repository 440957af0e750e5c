//! Command implementations for the CLI interface.
//!
//! Every subcommand is a thin wrapper over a `TaskStore` call: validation
//! happens here at the boundary, store errors are printed and become exit
//! code 1. The store itself never rejects an empty title.

use std::path::Path;

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::store::{StoreError, TaskStore};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (the default when no subcommand is given).
    Ui,

    /// Add a new task.
    Add {
        /// Task title. Must not be empty.
        title: String,
    },

    /// Print every task, one row per line.
    List,

    /// Mark a task as complete.
    Complete {
        /// Task ID.
        id: u64,
    },

    /// Mark a completed task as incomplete again.
    Reopen {
        /// Task ID.
        id: u64,
    },

    /// Replace a task's title. The edited task goes back to incomplete.
    Edit {
        /// Task ID.
        id: u64,
        /// New title. Must not be empty.
        title: String,
    },

    /// Delete a task. Unknown IDs are ignored.
    Delete {
        /// Task ID.
        id: u64,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn fail(e: StoreError) -> ! {
    eprintln!("{e}");
    std::process::exit(1);
}

/// Launch the terminal user interface.
pub fn cmd_ui(db_path: &Path) {
    if let Err(e) = run_tui(db_path) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Add a new task to the store.
pub fn cmd_add(store: &mut TaskStore, title: String) {
    let title = title.trim().to_string();
    if title.is_empty() {
        eprintln!("Please enter a title.");
        std::process::exit(1);
    }
    match store.add(&title) {
        Ok(id) => println!("Added task {id}"),
        Err(e) => fail(e),
    }
}

/// Print all tasks in insertion order.
pub fn cmd_list(store: &TaskStore) {
    if store.tasks().is_empty() {
        println!("No tasks.");
        return;
    }
    for task in store.tasks() {
        println!("{task}");
    }
}

/// Mark a task as completed.
pub fn cmd_complete(store: &mut TaskStore, id: u64) {
    match store.mark_complete(id) {
        Ok(()) => println!("Marked task {id} complete"),
        Err(e) => fail(e),
    }
}

/// Reopen a completed task.
pub fn cmd_reopen(store: &mut TaskStore, id: u64) {
    match store.mark_uncomplete(id) {
        Ok(()) => println!("Reopened task {id}"),
        Err(e) => fail(e),
    }
}

/// Replace a task's title.
pub fn cmd_edit(store: &mut TaskStore, id: u64, title: String) {
    let title = title.trim().to_string();
    if title.is_empty() {
        eprintln!("Please enter a title.");
        std::process::exit(1);
    }
    match store.edit(id, &title) {
        Ok(()) => println!("Updated task {id}"),
        Err(e) => fail(e),
    }
}

/// Delete a task. Deleting an id that does not exist is not an error.
pub fn cmd_delete(store: &mut TaskStore, id: u64) {
    match store.delete(id) {
        Ok(()) => println!("Deleted task {id}"),
        Err(e) => fail(e),
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;

    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}
