use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::{Config, parse_tags};
use crate::io::store_io::TASKS_FILE;
use crate::ops::session::Session;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App backed by a temp directory, with tasks given as
/// `(title, priority, comma-separated tags)`. Keep the TempDir alive.
pub fn app_with_tasks(tasks: &[(&str, &str, &str)]) -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(dir.path().join(TASKS_FILE));
    for (title, priority, tags) in tasks {
        session.on_create_requested(title, priority, parse_tags(tags));
    }
    let app = App::new(session, Config::default(), dir.path().to_path_buf());
    (dir, app)
}
