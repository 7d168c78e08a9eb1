//! Terminal-side clipboard and prompt providers.

use rotation_core::{ClipboardError, ClipboardProvider};
use std::io::BufRead;

/// The desktop clipboard, opened on first use.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialised".to_string()))
    }
}

impl ClipboardProvider for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.handle()?
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }

    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        match self.handle()?.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }
}

/// Reads a pasted payload from the session input.
///
/// The paste ends as soon as the collected lines parse as JSON, so
/// pretty-printed payloads may contain blank lines. Otherwise it ends at
/// two blank lines in a row or at end of input. A blank first line cancels.
pub struct PromptReader<'a, R: BufRead> {
    input: &'a mut R,
}

impl<'a, R: BufRead> PromptReader<'a, R> {
    pub fn new(input: &'a mut R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> ClipboardProvider for PromptReader<'_, R> {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("the prompt cannot receive text".to_string()))
    }

    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        let mut payload = String::new();
        let mut blank_run = 0;
        loop {
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            if read == 0 {
                break;
            }
            if line.trim().is_empty() {
                if payload.is_empty() {
                    break;
                }
                blank_run += 1;
                if blank_run == 2 {
                    break;
                }
                payload.push_str(&line);
                continue;
            }
            blank_run = 0;
            payload.push_str(&line);
            if serde_json::from_str::<serde_json::Value>(&payload).is_ok() {
                break;
            }
        }
        Ok((!payload.trim().is_empty()).then_some(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_prompt_ends_when_json_is_complete() {
        let mut input = Cursor::new("[\n{\"tick\":1,\"ability\":\"A\"}\n]\nshow\n");
        let text = PromptReader::new(&mut input).read_text().unwrap().unwrap();
        assert_eq!(text, "[\n{\"tick\":1,\"ability\":\"A\"}\n]\n");

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "show\n");
    }

    #[test]
    fn test_prompt_keeps_blank_lines_inside_json() {
        let pasted = "[\n  {\"tick\": 7, \"ability\": \"Kick\"},\n\n  {\"tick\": 9, \"ability\": \"Slice\"}\n]\n";
        let mut input = Cursor::new(format!("{pasted}show\n"));
        let text = PromptReader::new(&mut input).read_text().unwrap().unwrap();
        assert_eq!(text, pasted);
        let events = rotation_core::parse_events(&text).unwrap();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_prompt_invalid_paste_ends_at_two_blank_lines() {
        let mut input = Cursor::new("[{\"tick\": oops\n\n\nshow\n");
        let text = PromptReader::new(&mut input).read_text().unwrap().unwrap();
        assert!(text.starts_with("[{\"tick\": oops"));

        let mut rest = String::new();
        input.read_line(&mut rest).unwrap();
        assert_eq!(rest, "show\n");
    }

    #[test]
    fn test_prompt_blank_first_line_cancels() {
        let mut input = Cursor::new("\n[]\n");
        assert_eq!(PromptReader::new(&mut input).read_text().unwrap(), None);

        let mut empty = Cursor::new("");
        assert_eq!(PromptReader::new(&mut empty).read_text().unwrap(), None);
    }

    #[test]
    fn test_prompt_is_read_only() {
        let mut input = Cursor::new("");
        assert!(PromptReader::new(&mut input).write_text("x").is_err());
    }
}
