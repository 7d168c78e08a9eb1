//! Clipboard and prompt collaborator seam.

use crate::error::ClipboardError;

/// Text transport used by export and import.
///
/// Front ends plug in the system clipboard, a terminal prompt, or
/// [`MemoryClipboard`] for headless use.
pub trait ClipboardProvider {
    /// Publish `text`.
    ///
    /// # Errors
    /// Returns [`ClipboardError::Unavailable`] if the text could not be written.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Fetch text; `Ok(None)` means the user cancelled.
    ///
    /// # Errors
    /// Returns [`ClipboardError::Unavailable`] if the text could not be read.
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError>;
}

/// In-process clipboard holding at most one string.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    unavailable: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            unavailable: false,
        }
    }

    /// A clipboard whose every operation fails.
    pub fn unavailable() -> Self {
        Self {
            contents: None,
            unavailable: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable("clipboard disabled".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable("clipboard disabled".to_string()));
        }
        Ok(self.contents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_round_trip() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.read_text().unwrap(), None);
        clipboard.write_text("hello").unwrap();
        assert_eq!(clipboard.contents(), Some("hello"));
        assert_eq!(clipboard.read_text().unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_unavailable_clipboard_fails() {
        let mut clipboard = MemoryClipboard::unavailable();
        assert!(clipboard.write_text("x").is_err());
        assert!(clipboard.read_text().is_err());
    }
}
