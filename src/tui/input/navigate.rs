use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{AddForm, App, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Char('q')) => app.should_quit = true,
        (m, KeyCode::Char('c')) if m.contains(KeyModifiers::CONTROL) => app.should_quit = true,

        // Movement
        (_, KeyCode::Down | KeyCode::Char('j')) => app.move_selection(1),
        (_, KeyCode::Up | KeyCode::Char('k')) => app.move_selection(-1),
        (_, KeyCode::PageDown) => app.move_selection(10),
        (_, KeyCode::PageUp) => app.move_selection(-10),
        (_, KeyCode::Home | KeyCode::Char('g')) => app.select_first(),
        (_, KeyCode::End | KeyCode::Char('G')) => app.select_last(),

        // Task actions
        (_, KeyCode::Char('a')) => {
            app.add_form = Some(AddForm::default());
            app.mode = Mode::Add;
        }
        (_, KeyCode::Char('c')) => {
            if let Some(id) = selected_id(app) {
                app.session.on_toggle_requested(&id);
            }
        }
        (_, KeyCode::Char('d')) => {
            if let Some(id) = selected_id(app) {
                app.session.on_delete_requested(&id);
            }
        }
        (_, KeyCode::Enter) => {
            app.show_detail = app.session.current_selection().is_some();
        }

        // Search
        (_, KeyCode::Char('/')) => app.mode = Mode::Search,
        (_, KeyCode::Esc) => app.session.on_filter_cleared(),

        (_, KeyCode::Char('t')) => app.toggle_theme(),

        _ => {}
    }
}

/// Any of Esc, Enter or q closes the details popup
pub(super) fn handle_detail_popup(app: &mut App, key: KeyEvent) {
    if matches!(
        key.code,
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
    ) {
        app.show_detail = false;
    }
}

fn selected_id(app: &App) -> Option<String> {
    app.session.current_selection().map(|t| t.id.clone())
}
