use serde::{Deserialize, Serialize};
use std::fmt;

/// User-facing outcome of an export or import attempt.
/// Front ends show these as alerts or status lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notice {
    /// Export text reached the clipboard.
    Exported { events: usize },
    /// The timeline was replaced by an imported rotation.
    Imported { events: usize, blocks: usize },
    /// The prompt was dismissed without text.
    ImportCancelled,
    /// The payload failed validation; the timeline is unchanged.
    ImportRejected { reason: String },
    /// The clipboard or prompt could not be reached; the timeline is unchanged.
    ClipboardFailed { reason: String },
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ImportRejected { .. } | Self::ClipboardFailed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exported { .. } => write!(f, "Timeline JSON copied to clipboard!"),
            Self::Imported { events, blocks } => {
                write!(f, "Imported {events} abilities ({blocks} blocks).")
            }
            Self::ImportCancelled => write!(f, "Import cancelled."),
            Self::ImportRejected { reason } | Self::ClipboardFailed { reason } => {
                write!(f, "{reason}")
            }
        }
    }
}
