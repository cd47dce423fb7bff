use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Task priority. Anything unrecognized coming from outside collapses to `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    /// Strict parse of the lowercase storage name
    pub fn from_name(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Lenient parse for user input: trimmed, case-insensitive, defaulting to `Normal`
    pub fn coerce(s: &str) -> Priority {
        Priority::from_name(&s.trim().to_lowercase()).unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    /// Capitalized label for display
    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::High => "High",
        }
    }

    /// Single-cell marker used in the task table
    pub fn icon(self) -> char {
        match self {
            Priority::Low => '\u{25BD}',    // ▽
            Priority::Normal => '\u{2500}', // ─
            Priority::High => '\u{25B2}',   // ▲
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Stored files are external input: an unknown string becomes `Normal` instead
// of failing the whole load. A non-string value is still a type error.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Priority::from_name(&s).unwrap_or_default())
    }
}

/// A single tracked task, stored on disk with exactly these field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Decimal id, unique within the store and never reused
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Display order is insertion order
    #[serde(default)]
    pub tags: Vec<String>,
    /// Local timestamp, `YYYY-MM-DDTHH:MM:SS.ffffff`
    #[serde(default = "now_timestamp")]
    pub created_at: String,
}

impl Task {
    /// Create a new pending task stamped with the current time
    pub fn new(id: String, title: String, priority: Priority, tags: Vec<String>) -> Self {
        Task {
            id,
            title,
            completed: false,
            priority,
            tags: normalize_tags(tags),
            created_at: now_timestamp(),
        }
    }

    /// The id as a number, if it is one
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.parse().ok()
    }

    pub fn status_icon(&self) -> char {
        if self.completed { '\u{2713}' } else { '\u{25CB}' } // ✓ / ○
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed { "Completed" } else { "Pending" }
    }

    /// `created_at` cut to second precision for display
    pub fn created_display(&self) -> &str {
        match self.created_at.char_indices().nth(19) {
            Some((idx, _)) => &self.created_at[..idx],
            None => &self.created_at,
        }
    }
}

/// Current local time in the sortable format used for `created_at`
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Trim tags, dropping empties and repeats (first occurrence wins)
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Split comma-separated tag input into discrete tags
pub fn parse_tags(text: &str) -> Vec<String> {
    normalize_tags(text.split(','))
}
