use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};

use super::common::edit_line;

/// Search bar has focus: the filter follows every keystroke
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Keep the filter, go back to the list
        KeyCode::Enter | KeyCode::Down | KeyCode::Tab => app.mode = Mode::Navigate,
        // Drop the filter
        KeyCode::Esc => {
            app.session.on_filter_cleared();
            app.mode = Mode::Navigate;
        }
        _ => {
            let mut text = app.session.filter_text().to_string();
            if edit_line(&mut text, key) {
                app.session.on_filter_text_changed(&text);
            }
        }
    }
}
