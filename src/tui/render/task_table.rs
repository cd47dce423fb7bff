use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::Task;
use crate::tui::app::App;
use crate::util::unicode::{display_width, fit_to_width, truncate_to_width};

use super::push_highlighted_spans;

/// Cells taken by the leading marker, status and priority columns
const PREFIX_W: usize = 7;
const MAX_TAGS_W: usize = 24;

/// Column widths for a table body `width` cells wide
fn column_widths(width: usize) -> (usize, usize) {
    let tags_w = if width >= 40 { (width / 3).min(MAX_TAGS_W) } else { 0 };
    let gap = if tags_w > 0 { 1 } else { 0 };
    let title_w = width.saturating_sub(PREFIX_W + tags_w + gap);
    (title_w, tags_w)
}

/// Render the filtered task list with the selected row highlighted
pub fn render_task_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let total = app.session.store().len();
    let shown = app.session.current_filtered_view().len();

    let title = if app.session.filter_text().is_empty() {
        format!(" Tasks ({}) ", total)
    } else {
        format!(" Tasks ({} of {}) ", shown, total)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if shown == 0 {
        let msg = if total == 0 {
            " No tasks yet. Press a to add one.".to_string()
        } else {
            format!(" No tasks match \"{}\"", app.session.filter_text())
        };
        let empty = Paragraph::new(msg).style(Style::default().fg(app.theme.dim).bg(bg));
        frame.render_widget(empty, inner);
        return;
    }

    let width = inner.width as usize;
    let body_h = (inner.height as usize).saturating_sub(1);
    app.scroll_to_selection(body_h);

    let (title_w, tags_w) = column_widths(width);
    let mut lines: Vec<Line> = Vec::new();

    // Header
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let mut header = format!(" S  P  {}", fit_to_width("Title", title_w));
    if tags_w > 0 {
        header.push(' ');
        header.push_str(&fit_to_width("Tags", tags_w));
    }
    lines.push(Line::from(Span::styled(header, header_style)));

    let search_re = app.active_search_re();
    let selected = app.session.selected_position();
    let view = app.session.current_filtered_view();
    for (i, task) in view
        .iter()
        .enumerate()
        .skip(app.table_scroll)
        .take(body_h)
    {
        let is_selected = selected == Some(i);
        lines.push(task_row(
            app,
            task,
            is_selected,
            title_w,
            tags_w,
            search_re.as_ref(),
        ));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, inner);
}

fn task_row<'a>(
    app: &App,
    task: &Task,
    is_selected: bool,
    title_w: usize,
    tags_w: usize,
    search_re: Option<&regex::Regex>,
) -> Line<'a> {
    let theme = &app.theme;
    let bg = if is_selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let fill = Style::default().bg(bg);
    let match_style = Style::default()
        .fg(theme.search_match_fg)
        .bg(theme.search_match_bg);

    let mut spans: Vec<Span> = Vec::new();

    // Selection marker
    spans.push(Span::styled(
        if is_selected { "\u{258E}" } else { " " }, // ▎
        Style::default().fg(theme.highlight).bg(bg),
    ));
    spans.push(Span::styled(
        format!("{}  ", task.status_icon()),
        Style::default().fg(theme.status_color(task.completed)).bg(bg),
    ));
    spans.push(Span::styled(
        format!("{}  ", task.priority.icon()),
        Style::default().fg(theme.priority_color(task.priority)).bg(bg),
    ));

    // Title
    let mut title_style = Style::default().fg(theme.text_bright).bg(bg);
    if is_selected {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    if task.completed {
        title_style = title_style.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT);
    }
    let title = truncate_to_width(&task.title, title_w);
    let title_cells = display_width(&title);
    push_highlighted_spans(&mut spans, &title, title_style, match_style, search_re);
    if title_cells < title_w {
        spans.push(Span::styled(" ".repeat(title_w - title_cells), fill));
    }

    // Tags
    if tags_w > 0 {
        spans.push(Span::styled(" ", fill));
        push_tag_spans(&mut spans, app, task, tags_w, bg, match_style, search_re);
    }

    // Pad selected line so the highlight spans the full row
    if is_selected {
        let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let total = PREFIX_W + title_w + if tags_w > 0 { tags_w + 1 } else { 0 };
        if used < total {
            spans.push(Span::styled(" ".repeat(total - used), fill));
        }
    }

    Line::from(spans)
}

/// Tags in their own colors when they fit, else one truncated dim run
fn push_tag_spans(
    spans: &mut Vec<Span>,
    app: &App,
    task: &Task,
    tags_w: usize,
    bg: ratatui::style::Color,
    match_style: Style,
    search_re: Option<&regex::Regex>,
) {
    let joined = task.tags.join(", ");
    if display_width(&joined) > tags_w {
        let text = truncate_to_width(&joined, tags_w);
        push_highlighted_spans(
            spans,
            &text,
            Style::default().fg(app.theme.dim).bg(bg),
            match_style,
            search_re,
        );
        return;
    }
    for (i, tag) in task.tags.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(", ", Style::default().fg(app.theme.dim).bg(bg)));
        }
        push_highlighted_spans(
            spans,
            tag,
            Style::default().fg(app.theme.tag_color(tag)).bg(bg),
            match_style,
            search_re,
        );
    }
}
