//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    TaskList,
    EditTask,
}

/// Which widget receives typed characters in the main view.
#[derive(Clone, Copy, PartialEq)]
pub enum Focus {
    Input,
    List,
}
