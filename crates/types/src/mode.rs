use serde::{Deserialize, Serialize};
use std::fmt;

/// How the invoice is presented on screen. Switching modes never touches the
/// invoice itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Edit,
    Preview,
}

impl ViewMode {
    /// Reads the `mode` query parameter. Only `"preview"` selects preview;
    /// anything else, including absence, is edit mode.
    pub fn from_query(mode: Option<&str>) -> Self {
        match mode {
            Some("preview") => ViewMode::Preview,
            _ => ViewMode::Edit,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Edit => "edit",
            ViewMode::Preview => "preview",
        }
    }

    pub fn is_edit(self) -> bool {
        self == ViewMode::Edit
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
