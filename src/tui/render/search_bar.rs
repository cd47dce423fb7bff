use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};

const PLACEHOLDER: &str = "Search tasks... (press / to focus, Esc to clear)";

/// Render the bordered search input across the top of the screen
pub fn render_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.surface;
    let focused = app.mode == Mode::Search;
    let text = app.session.filter_text();

    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };

    let mut spans: Vec<Span> = vec![Span::styled(
        " /",
        Style::default().fg(app.theme.dim).bg(bg),
    )];
    if text.is_empty() && !focused {
        spans.push(Span::styled(
            format!(" {}", PLACEHOLDER),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    } else {
        spans.push(Span::styled(
            format!(" {}", text),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if focused {
        spans.push(Span::styled(
            "\u{258C}", // ▌ cursor
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search ")
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
