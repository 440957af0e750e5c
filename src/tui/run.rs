//! Terminal setup and teardown for the UI.

use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::store::StoreError;
use crate::tui::app::App;

/// Run the UI against the task file at `db_path`.
///
/// The store is loaded before the terminal is touched, so a malformed
/// task file fails here with a readable message instead of inside the
/// alternate screen.
pub fn run_tui(db_path: &Path) -> Result<(), StoreError> {
    let mut app = App::new(db_path)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(StoreError::from)
}
