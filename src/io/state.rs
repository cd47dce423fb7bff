use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::ThemeKind;

/// Persisted TUI state (written to .tasky-state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UiState {
    /// Id of the selected task
    #[serde(default)]
    pub selected: Option<String>,
    /// Theme in use when the session ended
    #[serde(default)]
    pub theme: Option<ThemeKind>,
}

/// Read .tasky-state.json from the data directory
pub fn read_ui_state(data_dir: &Path) -> Option<UiState> {
    let path = data_dir.join(".tasky-state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .tasky-state.json to the data directory
pub fn write_ui_state(data_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = data_dir.join(".tasky-state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
