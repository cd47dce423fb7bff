use crossterm::event::{KeyCode, KeyEvent};

use crate::model::parse_tags;
use crate::tui::app::{App, Mode};

use super::common::edit_line;

/// Add-task form is open
pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    let Some(form) = app.add_form.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Esc => close_form(app),
        KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.prev(),
        KeyCode::Enter => submit(app),
        _ => {
            if edit_line(form.focused_mut(), key) {
                form.error = None;
            }
        }
    }
}

fn submit(app: &mut App) {
    let Some(form) = app.add_form.as_mut() else {
        return;
    };
    if form.title.trim().is_empty() {
        form.error = Some("Title is required".to_string());
        return;
    }
    let tags = parse_tags(&form.tags);
    let (title, priority) = (form.title.clone(), form.priority.clone());
    if app.session.on_create_requested(&title, &priority, tags).is_none() {
        if let Some(form) = app.add_form.as_mut() {
            form.error = Some("No task ids left".to_string());
        }
        return;
    }
    close_form(app);
}

fn close_form(app: &mut App) {
    app.add_form = None;
    app.mode = Mode::Navigate;
}
