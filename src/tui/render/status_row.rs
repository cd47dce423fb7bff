use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

/// Key hints for the current mode
fn key_hints(app: &App) -> &'static str {
    if app.show_detail {
        return "Esc close";
    }
    match app.mode {
        Mode::Navigate => "a add  c complete  d delete  / search  Enter details  t theme  q quit",
        Mode::Search => "type to filter  Enter done  Esc clear",
        Mode::Add => "Tab next field  Enter add  Esc cancel",
    }
}

/// Task count for the right edge: "N tasks" or "M of N tasks" when filtered
fn count_label(app: &App) -> String {
    let total = app.session.store().len();
    let noun = if total == 1 { "task" } else { "tasks" };
    if app.session.filter_text().is_empty() {
        format!("{} {} ", total, noun)
    } else {
        let shown = app.session.current_filtered_view().len();
        format!("{} of {} {} ", shown, total, noun)
    }
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let count = count_label(app);
    let count_w = display_width(&count);
    let left_w = width.saturating_sub(count_w + 1);

    let left = match &app.status_message {
        Some(msg) => Span::styled(
            truncate_to_width(&format!(" {}", msg), left_w),
            Style::default().fg(app.theme.red).bg(bg),
        ),
        None if app.config.ui.show_key_hints => Span::styled(
            truncate_to_width(&format!(" {}", key_hints(app)), left_w),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
        None => Span::styled(String::new(), Style::default().bg(bg)),
    };

    let mut spans = vec![left];
    let used = display_width(&spans[0].content);
    if used + count_w <= width {
        spans.push(Span::styled(
            " ".repeat(width - used - count_w),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(
            count,
            Style::default().fg(app.theme.text).bg(bg),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
