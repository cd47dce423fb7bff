use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::Task;
use crate::tui::app::App;
use crate::tui::theme::Theme;

/// Render the side panel describing the selected task
pub fn render_detail_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.surface;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            " Task Details ",
            Style::default()
                .fg(app.theme.blue)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));

    let lines = match app.session.current_selection() {
        Some(task) => {
            let mut lines = task_detail_lines(&app.theme, task, bg);
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " Press Enter for detailed view",
                Style::default().fg(app.theme.dim).bg(bg),
            )));
            lines
        }
        None => vec![Line::from(Span::styled(
            " Select a task to view details",
            Style::default().fg(app.theme.dim).bg(bg),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Labelled fields for one task, shared with the details popup
pub(super) fn task_detail_lines(theme: &Theme, task: &Task, bg: ratatui::style::Color) -> Vec<Line<'static>> {
    let label = Style::default()
        .fg(theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let value = Style::default().fg(theme.text).bg(bg);

    let field = |name: &str, spans: Vec<Span<'static>>| {
        let mut all = vec![Span::styled(format!(" {}: ", name), label)];
        all.extend(spans);
        Line::from(all)
    };

    let status = Span::styled(
        format!("{} {}", task.status_icon(), task.status_label()),
        Style::default().fg(theme.status_color(task.completed)).bg(bg),
    );
    let priority = Span::styled(
        format!("{} {}", task.priority.icon(), task.priority.label()),
        Style::default().fg(theme.priority_color(task.priority)).bg(bg),
    );
    let tags: Vec<Span<'static>> = if task.tags.is_empty() {
        vec![Span::styled("None", Style::default().fg(theme.dim).bg(bg))]
    } else {
        let mut spans = Vec::new();
        for (i, tag) in task.tags.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(", ", value));
            }
            spans.push(Span::styled(
                tag.clone(),
                Style::default().fg(theme.tag_color(tag)).bg(bg),
            ));
        }
        spans
    };

    vec![
        field("Title", vec![Span::styled(task.title.clone(), value)]),
        Line::from(""),
        field("Status", vec![status]),
        Line::from(""),
        field("Priority", vec![priority]),
        Line::from(""),
        field("Tags", tags),
        Line::from(""),
        field(
            "Created",
            vec![Span::styled(task.created_display().to_string(), value)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn render(app: &App) -> String {
        render_to_string(40, 16, |frame, area| {
            render_detail_panel(frame, app, area);
        })
    }

    #[test]
    fn placeholder_without_selection() {
        let (_dir, app) = app_with_tasks(&[]);
        assert!(render(&app).contains("Select a task to view details"));
    }

    #[test]
    fn shows_selected_task_fields() {
        let (_dir, mut app) = app_with_tasks(&[
            ("Buy milk", "", ""),
            ("Write report", "high", "work, q1"),
        ]);
        app.session.on_selection_moved(1);
        let output = render(&app);
        assert!(output.contains("Title: Write report"));
        assert!(output.contains("Status: \u{25CB} Pending"));
        assert!(output.contains("Priority: \u{25B2} High"));
        assert!(output.contains("Tags: work, q1"));
        assert!(output.contains("Created: "));
        assert!(!output.contains("Buy milk"));
    }

    #[test]
    fn no_tags_shows_none() {
        let (_dir, mut app) = app_with_tasks(&[("Buy milk", "low", "")]);
        app.session.on_toggle_requested("0");
        let output = render(&app);
        assert!(output.contains("Tags: None"));
        assert!(output.contains("Status: \u{2713} Completed"));
        assert!(output.contains("Priority: \u{25BD} Low"));
    }

    #[test]
    fn created_is_cut_to_seconds() {
        let (_dir, app) = app_with_tasks(&[("t", "", "")]);
        let task = app.session.current_selection().unwrap();
        let lines = task_detail_lines(&app.theme, task, app.theme.surface);
        let created: String = lines
            .last()
            .unwrap()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(created, format!(" Created: {}", &task.created_at[..19]));
    }
}
