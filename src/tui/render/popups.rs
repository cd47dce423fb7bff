use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};
use crate::util::unicode::truncate_to_width;

use super::centered_rect_fixed;
use super::detail_panel::task_detail_lines;

const POPUP_W: u16 = 60;

/// Render the add-task form
pub fn render_add_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = app.add_form.as_ref() else {
        return;
    };

    let bg = app.theme.surface;
    let header_style = Style::default()
        .fg(app.theme.green)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(app.theme.text).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let field_w = (popup_w as usize).saturating_sub(6);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Add New Task", header_style)),
        Line::from(""),
    ];

    let fields = [
        (FormField::Title, "Task Title:", "Enter task title..."),
        (
            FormField::Priority,
            "Priority:",
            "low, normal, high (default: normal)",
        ),
        (
            FormField::Tags,
            "Tags (comma-separated):",
            "work, personal, urgent...",
        ),
    ];
    for (field, label, placeholder) in fields {
        let focused = form.focus == field;
        let marker_style = Style::default().fg(app.theme.highlight).bg(bg);
        lines.push(Line::from(vec![
            Span::styled(if focused { " \u{25B8} " } else { "   " }, marker_style), // ▸
            Span::styled(label, label_style),
        ]));

        let value = form.field(field);
        let mut spans = vec![Span::styled("   ", dim_style)];
        if value.is_empty() && !focused {
            spans.push(Span::styled(
                truncate_to_width(placeholder, field_w),
                dim_style.add_modifier(Modifier::ITALIC),
            ));
        } else {
            spans.push(Span::styled(
                truncate_to_width(value, field_w),
                Style::default().fg(app.theme.text_bright).bg(bg),
            ));
        }
        if focused {
            spans.push(Span::styled("\u{258C}", marker_style)); // ▌ cursor
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    match &form.error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!(" {}", err),
            Style::default().fg(app.theme.red).bg(bg),
        ))),
        None => lines.push(Line::from(Span::styled(
            " Enter add  Tab next field  Esc cancel",
            dim_style,
        ))),
    }

    let popup_h = (lines.len() as u16) + 2;
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

/// Render the details popup for the selected task
pub fn render_detail_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(task) = app.session.current_selection() else {
        return;
    };

    let bg = app.theme.surface;
    let header_style = Style::default()
        .fg(app.theme.blue)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(" Task Details", header_style)),
        Line::from(""),
    ];
    lines.extend(task_detail_lines(&app.theme, task, bg));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Esc close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let popup_w = POPUP_W.min(area.width.saturating_sub(2));
    let popup_h = (lines.len() as u16) + 2;
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::{AddForm, Mode};
    use crate::tui::render::test_helpers::*;

    #[test]
    fn add_popup_shows_placeholders_and_focus() {
        let (_dir, mut app) = app_with_tasks(&[]);
        app.mode = Mode::Add;
        app.add_form = Some(AddForm::default());
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_add_popup(frame, &app, area);
        });
        assert!(output.contains("Add New Task"));
        assert!(output.contains("\u{25B8} Task Title:"));
        assert!(output.contains("low, normal, high (default: normal)"));
        assert!(output.contains("work, personal, urgent..."));
        assert!(output.contains("Esc cancel"));
    }

    #[test]
    fn add_popup_shows_values_and_error() {
        let (_dir, mut app) = app_with_tasks(&[]);
        app.mode = Mode::Add;
        app.add_form = Some(AddForm {
            title: String::new(),
            priority: "high".into(),
            tags: "work".into(),
            focus: FormField::Tags,
            error: Some("Title is required".into()),
        });
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_add_popup(frame, &app, area);
        });
        assert!(output.contains("Enter task title..."));
        assert!(output.contains("   high"));
        assert!(output.contains("work\u{258C}"));
        assert!(output.contains("\u{25B8} Tags (comma-separated):"));
        assert!(output.contains("Title is required"));
    }

    #[test]
    fn detail_popup_lists_fields() {
        let (_dir, mut app) = app_with_tasks(&[("Write report", "high", "work")]);
        app.show_detail = true;
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_detail_popup(frame, &app, area);
        });
        assert!(output.contains("Task Details"));
        assert!(output.contains("Title: Write report"));
        assert!(output.contains("Tags: work"));
        assert!(output.contains("Esc close"));
    }

    #[test]
    fn detail_popup_without_selection_draws_nothing() {
        let (_dir, app) = app_with_tasks(&[]);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_detail_popup(frame, &app, area);
        });
        assert!(output.is_empty());
    }
}
