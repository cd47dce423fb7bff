use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode::last_grapheme_start;

/// Apply a line-editing key to `buf`. Returns true if the text changed.
///
/// Input is append-only at the end of the line: printable characters are
/// pushed, Backspace removes one grapheme, Ctrl-U clears and Ctrl-W deletes
/// the last word.
pub(super) fn edit_line(buf: &mut String, key: KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            let changed = !buf.is_empty();
            buf.clear();
            changed
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => {
            let trimmed_len = buf.trim_end().len();
            let cut = buf[..trimmed_len]
                .rfind(char::is_whitespace)
                .map_or(0, |i| i + 1);
            let changed = cut < buf.len();
            buf.truncate(cut);
            changed
        }
        (m, KeyCode::Char(_)) if m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => false,
        (_, KeyCode::Char(c)) => {
            buf.push(c);
            true
        }
        (_, KeyCode::Backspace) => match last_grapheme_start(buf) {
            Some(start) => {
                buf.truncate(start);
                true
            }
            None => false,
        },
        _ => false,
    }
}
