//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the store and all view
//! state, handles user input, and renders the three surfaces: the main
//! list view with its title entry, the modal edit dialog, and the blocking
//! warning dialog.

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::store::{StoreError, TaskStore};
use crate::tui::{
    colors::{DARK_RED, GOLD},
    enums::{AppState, Focus},
    input::InputField,
    utils::centered_rect,
};

/// Main application state for the terminal user interface.
///
/// Holds no business state beyond the input fields, the row mapping, the
/// selection, and the currently open dialog; everything else lives in the
/// store.
pub struct App {
    state: AppState,
    store: TaskStore,
    focus: Focus,
    title_input: InputField,
    edit_input: InputField,
    /// Row position in the displayed list -> task id.
    rows: Vec<u64>,
    list_state: ListState,
    /// Id of the task open in the edit dialog.
    editing: Option<u64>,
    /// A set warning blocks all other input until dismissed.
    warning: Option<String>,
    status_message: String,
}

impl App {
    /// Create a new App instance, loading the store from the given path.
    ///
    /// Fails if the task file exists but cannot be parsed; the UI must not
    /// start over a file it would clobber on the first save.
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        let store = TaskStore::load(db_path)?;

        let mut app = App {
            state: AppState::TaskList,
            store,
            focus: Focus::Input,
            title_input: InputField::new(),
            edit_input: InputField::new(),
            rows: Vec::new(),
            list_state: ListState::default(),
            editing: None,
            warning: None,
            status_message: String::new(),
        };

        app.refresh_rows();
        Ok(app)
    }

    /// Rebuild the row -> id mapping from the store, preserving the
    /// selection when the selected task still exists.
    ///
    /// Called after every successful mutation and never on a timer; the
    /// displayed list is only as fresh as the last user action.
    fn refresh_rows(&mut self) {
        let old_selected_id = self
            .list_state
            .selected()
            .and_then(|idx| self.rows.get(idx))
            .copied();

        self.rows = self.store.tasks().iter().map(|t| t.id).collect();

        if let Some(old_id) = old_selected_id {
            if let Some(new_idx) = self.rows.iter().position(|&id| id == old_id) {
                self.list_state.select(Some(new_idx));
                return;
            }
        }
        self.list_state
            .select(if self.rows.is_empty() { None } else { Some(0) });
    }

    /// Id of the currently selected row, if any.
    fn selected_id(&self) -> Option<u64> {
        self.list_state
            .selected()
            .and_then(|idx| self.rows.get(idx))
            .copied()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn warn(&mut self, msg: impl Into<String>) {
        self.warning = Some(msg.into());
    }

    /// Handle keyboard input in the main view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => return true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Input => Focus::List,
                    Focus::List => Focus::Input,
                };
            }
            _ => match self.focus {
                Focus::Input => self.handle_title_input(key),
                Focus::List => return self.handle_list_keys(key),
            },
        }
        false
    }

    /// Typing into the title field; Enter adds the task.
    fn handle_title_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => self.add_task(),
            KeyCode::Char(c) => self.title_input.handle_char(c),
            KeyCode::Backspace => self.title_input.handle_backspace(),
            KeyCode::Delete => self.title_input.handle_delete(),
            KeyCode::Left => self.title_input.move_cursor_left(),
            KeyCode::Right => self.title_input.move_cursor_right(),
            KeyCode::Down => self.focus = Focus::List,
            _ => {}
        }
    }

    /// Selection-scoped actions on the task list.
    ///
    /// Returns true if the application should quit.
    fn handle_list_keys(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if let Some(selected) = self.list_state.selected() {
                    if selected > 0 {
                        self.list_state.select(Some(selected - 1));
                    }
                } else if !self.rows.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Down => {
                if let Some(selected) = self.list_state.selected() {
                    if selected + 1 < self.rows.len() {
                        self.list_state.select(Some(selected + 1));
                    }
                } else if !self.rows.is_empty() {
                    self.list_state.select(Some(0));
                }
            }
            KeyCode::Char('c') | KeyCode::Enter => self.complete_selected(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('e') => self.open_edit_dialog(),
            KeyCode::Char('a') => self.focus = Focus::Input,
            KeyCode::Char('r') => {
                self.refresh_rows();
                self.set_status_message("List refreshed".to_string());
            }
            _ => {}
        }
        false
    }

    /// Add a task from the title field.
    ///
    /// An empty title is a validation warning caught here; the store is
    /// not called.
    fn add_task(&mut self) {
        if self.title_input.is_blank() {
            self.warn("Please enter a title.");
            return;
        }
        let title = self.title_input.value.trim().to_string();
        match self.store.add(&title) {
            Ok(id) => {
                self.title_input.clear();
                self.refresh_rows();
                self.set_status_message(format!("Added task {id}"));
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    fn complete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.warn("Please select a task to mark as complete.");
            return;
        };
        match self.store.mark_complete(id) {
            Ok(()) => {
                self.refresh_rows();
                self.set_status_message(format!("Marked task {id} complete"));
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.warn("Please select a task to delete.");
            return;
        };
        match self.store.delete(id) {
            Ok(()) => {
                self.refresh_rows();
                self.set_status_message(format!("Deleted task {id}"));
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    fn open_edit_dialog(&mut self) {
        let Some(id) = self.selected_id() else {
            self.warn("Please select a task to edit.");
            return;
        };
        // The row mapping only ever holds ids the store just produced.
        let Some(task) = self.store.get(id) else {
            return;
        };
        self.edit_input = InputField::with_value(&task.title);
        self.editing = Some(id);
        self.state = AppState::EditTask;
    }

    /// Keys inside the edit dialog. Enter saves, Esc cancels; an empty
    /// title warns and keeps the dialog open.
    fn handle_edit_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskList;
                self.editing = None;
            }
            KeyCode::Enter => self.save_edit(),
            KeyCode::Char(c) => self.edit_input.handle_char(c),
            KeyCode::Backspace => self.edit_input.handle_backspace(),
            KeyCode::Delete => self.edit_input.handle_delete(),
            KeyCode::Left => self.edit_input.move_cursor_left(),
            KeyCode::Right => self.edit_input.move_cursor_right(),
            _ => {}
        }
    }

    fn save_edit(&mut self) {
        if self.edit_input.is_blank() {
            self.warn("Please enter a title.");
            return;
        }
        let Some(id) = self.editing else {
            return;
        };
        let title = self.edit_input.value.trim().to_string();
        match self.store.edit(id, &title) {
            Ok(()) => {
                self.state = AppState::TaskList;
                self.editing = None;
                self.refresh_rows();
                self.set_status_message(format!("Updated task {id}"));
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    /// Poll for and handle keyboard events based on current state.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                self.status_message.clear();

                // A warning dialog swallows the next key, whatever it is.
                if self.warning.is_some() {
                    self.warning = None;
                    return Ok(false);
                }

                let should_quit = match self.state {
                    AppState::TaskList => self.handle_task_list_input(key.code, key.modifiers),
                    AppState::EditTask => {
                        self.handle_edit_input(key.code);
                        false
                    }
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Render the title entry and the task list.
    fn render_main(&mut self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)].as_ref())
            .split(area);

        let input_focused = self.state == AppState::TaskList && self.focus == Focus::Input;
        let input_style = if input_focused {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let title_input = Paragraph::new(self.title_input.value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Title - Enter to add")
                .border_style(input_style),
        );
        f.render_widget(title_input, chunks[0]);

        // Rows keep the fixed "ID: .., Title: .., Status: .." text format.
        let items: Vec<ListItem> = self
            .store
            .tasks()
            .iter()
            .map(|task| {
                let style = if task.completed {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(task.to_string()).style(style)
            })
            .collect();

        let list_style = if self.state == AppState::TaskList && self.focus == Focus::List {
            Style::default().fg(GOLD)
        } else {
            Style::default()
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Tasks ({})", self.rows.len()))
                    .border_style(list_style),
            )
            .highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(list, chunks[1], &mut self.list_state);

        if input_focused && self.warning.is_none() {
            f.set_cursor_position((
                chunks[0].x + self.title_input.cursor_col() as u16 + 1,
                chunks[0].y + 1,
            ));
        }
    }

    /// Render the modal edit dialog over the main view.
    fn render_edit_dialog(&mut self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 25, area);
        f.render_widget(Clear, area);

        let block = Block::default()
            .title("Edit Task - Enter to save, Esc to cancel")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GOLD));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let input_area = Rect {
            height: inner.height.min(3),
            ..inner
        };
        let input = Paragraph::new(self.edit_input.value.as_str())
            .block(Block::default().borders(Borders::ALL).title("Title"));
        f.render_widget(input, input_area);

        if self.warning.is_none() {
            f.set_cursor_position((
                input_area.x + self.edit_input.cursor_col() as u16 + 1,
                input_area.y + 1,
            ));
        }
    }

    /// Render the blocking warning dialog.
    fn render_warning(&mut self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Warning")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 20, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                self.warning.clone().unwrap_or_default(),
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from("Press any key to continue"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match self.state {
                AppState::TaskList => match self.focus {
                    Focus::Input => {
                        "Type a title, Enter to add | Tab: task list | Esc: quit".to_string()
                    }
                    Focus::List => {
                        "c: complete  e: edit  d: delete  a: add  r: refresh | q: quit".to_string()
                    }
                },
                AppState::EditTask => "Edit Task".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(GOLD).fg(Color::Rgb(20, 20, 20)))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function that layers the views.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
            .split(f.area());

        self.render_main(f, chunks[0]);

        if self.state == AppState::EditTask {
            self.render_edit_dialog(f, chunks[0]);
        }
        if self.warning.is_some() {
            self.render_warning(f, chunks[0]);
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    ///
    /// Handles rendering and input processing until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}
