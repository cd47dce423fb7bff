use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use regex::Regex;

use crate::io::config_io::read_config;
use crate::io::store_io::TASKS_FILE;
use crate::model::{Config, ThemeKind};
use crate::ops::session::Session;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the search bar; every keystroke refilters
    Search,
    /// The add-task form is open
    Add,
}

/// Field of the add-task form that has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Priority,
    Tags,
}

impl FormField {
    pub fn next(self) -> FormField {
        match self {
            FormField::Title => FormField::Priority,
            FormField::Priority => FormField::Tags,
            FormField::Tags => FormField::Title,
        }
    }

    pub fn prev(self) -> FormField {
        match self {
            FormField::Title => FormField::Tags,
            FormField::Priority => FormField::Title,
            FormField::Tags => FormField::Priority,
        }
    }
}

/// Raw text of the add-task form. Nothing is validated until submit.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    pub title: String,
    pub priority: String,
    pub tags: String,
    pub focus: FormField,
    /// Inline error shown under the fields
    pub error: Option<String>,
}

impl AddForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Priority => &self.priority,
            FormField::Tags => &self.tags,
        }
    }

    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Priority => &mut self.priority,
            FormField::Tags => &mut self.tags,
        }
    }
}

/// Main application state
pub struct App {
    pub session: Session,
    /// Directory holding the task file, UI state and recovery log
    pub data_dir: PathBuf,
    pub config: Config,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Open add-task form (Mode::Add)
    pub add_form: Option<AddForm>,
    /// Details popup for the selected task
    pub show_detail: bool,
    /// Transient message for the status row (storage/config warnings)
    pub status_message: Option<String>,
    /// First visible row of the task table
    pub table_scroll: usize,
}

impl App {
    pub fn new(session: Session, config: Config, data_dir: PathBuf) -> Self {
        let theme = Theme::from_config(config.ui.theme, &config.ui);
        let mut app = App {
            session,
            data_dir,
            config,
            mode: Mode::Navigate,
            should_quit: false,
            theme,
            add_form: None,
            show_detail: false,
            status_message: None,
            table_scroll: 0,
        };
        app.collect_storage_warning();
        app
    }

    pub fn set_theme(&mut self, kind: ThemeKind) {
        self.theme = Theme::from_config(kind, &self.config.ui);
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.kind.toggled());
    }

    /// Move a pending storage problem from the session into the status row
    pub fn collect_storage_warning(&mut self) {
        if let Some(err) = self.session.take_storage_warning() {
            self.status_message = Some(format!("{} (details in .tasky-recovery.log)", err));
        }
    }

    /// Case-insensitive literal regex for the current filter, for highlighting
    pub fn active_search_re(&self) -> Option<Regex> {
        let text = self.session.filter_text();
        if text.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(text))).ok()
    }

    /// Move the selection by `delta` rows, clamped to the filtered view
    pub fn move_selection(&mut self, delta: isize) {
        let len = self.session.current_filtered_view().len();
        if len == 0 {
            return;
        }
        let current = self.session.selected_position().unwrap_or(0) as isize;
        let target = (current + delta).clamp(0, len as isize - 1) as usize;
        self.session.on_selection_moved(target);
    }

    pub fn select_first(&mut self) {
        self.session.on_selection_moved(0);
    }

    pub fn select_last(&mut self) {
        let len = self.session.current_filtered_view().len();
        if len > 0 {
            self.session.on_selection_moved(len - 1);
        }
    }

    /// Keep the selected row inside a table body of `height` rows
    pub fn scroll_to_selection(&mut self, height: usize) {
        let Some(pos) = self.session.selected_position() else {
            self.table_scroll = 0;
            return;
        };
        if height == 0 {
            return;
        }
        if pos < self.table_scroll {
            self.table_scroll = pos;
        } else if pos >= self.table_scroll + height {
            self.table_scroll = pos + 1 - height;
        }
    }
}

/// Restore UI state from .tasky-state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let ui_state = match read_ui_state(&app.data_dir) {
        Some(s) => s,
        None => return,
    };

    if let Some(kind) = ui_state.theme {
        app.set_theme(kind);
    }
    if let Some(id) = ui_state.selected {
        app.session.select_id(&id);
    }
}

/// Save UI state to .tasky-state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let ui_state = UiState {
        selected: app.session.current_selection().map(|t| t.id.clone()),
        theme: Some(app.theme.kind),
    };

    let _ = write_ui_state(&app.data_dir, &ui_state);
}

/// Build the app for a data directory: config, task file, saved UI state
pub fn load_app(data_dir: &Path) -> App {
    let (config, config_warning) = match read_config(data_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e.to_string())),
    };
    let session = Session::open(data_dir.join(TASKS_FILE));
    let mut app = App::new(session, config, data_dir.to_path_buf());
    restore_ui_state(&mut app);
    if app.status_message.is_none() {
        app.status_message = config_warning;
    }
    app
}

/// Run the TUI application against the working directory
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let mut app = load_app(&cwd);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut save_counter = 0u32;
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
            // Debounced state save: every ~5 key presses
            save_counter += 1;
            if save_counter >= 5 {
                save_ui_state(app);
                save_counter = 0;
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::state::{UiState, read_ui_state, write_ui_state};
    use tempfile::TempDir;

    fn app_in(dir: &TempDir) -> App {
        load_app(dir.path())
    }

    #[test]
    fn form_field_cycles() {
        assert_eq!(FormField::Title.next(), FormField::Priority);
        assert_eq!(FormField::Tags.next(), FormField::Title);
        assert_eq!(FormField::Title.prev(), FormField::Tags);
    }

    #[test]
    fn move_selection_clamps() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        for t in ["a", "b", "c"] {
            app.session.on_create_requested(t, "", vec![]);
        }
        app.move_selection(5);
        assert_eq!(app.session.selected_position(), Some(2));
        app.move_selection(-1);
        assert_eq!(app.session.selected_position(), Some(1));
        app.move_selection(-10);
        assert_eq!(app.session.selected_position(), Some(0));
        app.select_last();
        assert_eq!(app.session.selected_position(), Some(2));
        app.select_first();
        assert_eq!(app.session.selected_position(), Some(0));
    }

    #[test]
    fn move_selection_on_empty_view_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.move_selection(1);
        assert!(app.session.current_selection().is_none());
    }

    #[test]
    fn scroll_follows_selection() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        for i in 0..10 {
            app.session.on_create_requested(&format!("t{i}"), "", vec![]);
        }
        app.session.on_selection_moved(7);
        app.scroll_to_selection(3);
        assert_eq!(app.table_scroll, 5);
        app.session.on_selection_moved(2);
        app.scroll_to_selection(3);
        assert_eq!(app.table_scroll, 2);
    }

    #[test]
    fn search_regex_is_literal_and_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        assert!(app.active_search_re().is_none());
        app.session.on_filter_text_changed("a.b");
        let re = app.active_search_re().unwrap();
        assert!(re.is_match("xA.By"));
        assert!(!re.is_match("aXb"));
    }

    #[test]
    fn ui_state_round_trips_through_app() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        for t in ["a", "b"] {
            app.session.on_create_requested(t, "", vec![]);
        }
        app.session.on_selection_moved(1);
        app.toggle_theme();
        save_ui_state(&app);
        assert_eq!(
            read_ui_state(dir.path()),
            Some(UiState {
                selected: Some("1".into()),
                theme: Some(ThemeKind::Light),
            })
        );

        let restored = app_in(&dir);
        assert_eq!(restored.theme.kind, ThemeKind::Light);
        assert_eq!(
            restored.session.current_selection().map(|t| t.id.as_str()),
            Some("1")
        );
    }

    #[test]
    fn stale_saved_selection_falls_back() {
        let dir = TempDir::new().unwrap();
        let mut app = app_in(&dir);
        app.session.on_create_requested("a", "", vec![]);
        write_ui_state(
            dir.path(),
            &UiState {
                selected: Some("99".into()),
                theme: None,
            },
        )
        .unwrap();
        let restored = app_in(&dir);
        assert_eq!(
            restored.session.current_selection().map(|t| t.id.as_str()),
            Some("0")
        );
    }

    #[test]
    fn corrupt_task_file_surfaces_status() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(TASKS_FILE), "{oops").unwrap();
        let app = app_in(&dir);
        assert!(app.session.store().is_empty());
        let msg = app.status_message.unwrap();
        assert!(msg.contains("could not parse"));
        assert!(msg.contains(".tasky-recovery.log"));
    }

    #[test]
    fn bad_config_surfaces_status_and_uses_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tasky.toml"), "[ui\n").unwrap();
        let app = app_in(&dir);
        assert_eq!(app.theme.kind, ThemeKind::Dark);
        assert!(app.status_message.unwrap().contains("tasky.toml"));
    }

    #[test]
    fn config_picks_initial_theme() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tasky.toml"), "[ui]\ntheme = \"light\"\n").unwrap();
        let app = app_in(&dir);
        assert_eq!(app.theme.kind, ThemeKind::Light);
        assert!(app.status_message.is_none());
    }
}
