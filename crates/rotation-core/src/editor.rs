//! Rotation editor: the handlers a front end wires its events to.
//!
//! The editor owns the timeline and borrows the catalog. Each handler runs
//! to completion before the next event is processed, and the front end
//! re-reads [`RotationEditor::snapshot`] after every call to redraw.

use crate::catalog::{Catalog, CatalogEntry, SearchOptions};
use crate::clipboard::ClipboardProvider;
use crate::compiler::{self, ExportedEvent};
use crate::drag::{apply_drag_end, DragOutcome, DragSource, DropTarget};
use crate::error::{CoreError, DragError, ImportError, TimelineError};
use crate::events::Notice;
use crate::timeline::{Block, Timeline};

pub struct RotationEditor<'c> {
    catalog: &'c Catalog,
    search: SearchOptions,
    timeline: Timeline,
    active: Option<DragSource>,
}

impl<'c> RotationEditor<'c> {
    pub fn new(catalog: &'c Catalog, search: SearchOptions) -> Self {
        Self {
            catalog,
            search,
            timeline: Timeline::new(),
            active: None,
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn snapshot(&self) -> &[Block] {
        self.timeline.snapshot()
    }

    /// The item currently being dragged, for overlay rendering.
    pub fn active_drag(&self) -> Option<&DragSource> {
        self.active.as_ref()
    }

    /// Record the start of a drag.
    ///
    /// # Errors
    /// Returns [`DragError::UnknownItem`] if `item` does not resolve.
    pub fn drag_start(&mut self, item: &str) -> Result<&DragSource, DragError> {
        let source = DragSource::resolve(item, self.catalog)?;
        Ok(self.active.insert(source))
    }

    pub fn cancel_drag(&mut self) {
        self.active = None;
    }

    /// Finish a drag reported by raw identifiers.
    ///
    /// The active drag is cleared whether or not the drop succeeds.
    ///
    /// # Errors
    /// Returns a drag error if an identifier does not resolve, or a
    /// timeline error if the drop violates an index precondition.
    pub fn drag_end(&mut self, item: &str, target: Option<&str>) -> Result<DragOutcome, CoreError> {
        self.active = None;
        let source = DragSource::resolve(item, self.catalog)?;
        let target = target.map(DropTarget::resolve).transpose()?;
        Ok(self.drop_item(&source, target)?)
    }

    /// Finish a drag with already-resolved values.
    ///
    /// # Errors
    /// Returns [`TimelineError::OutOfRange`] for a palette drop past the end.
    pub fn drop_item(
        &mut self,
        source: &DragSource,
        target: Option<DropTarget>,
    ) -> Result<DragOutcome, TimelineError> {
        self.active = None;
        apply_drag_end(&mut self.timeline, source, target)
    }

    pub fn search(&self, query: &str) -> Vec<&'c CatalogEntry> {
        self.catalog.search(query, &self.search)
    }

    pub fn compile(&self) -> Vec<ExportedEvent> {
        compiler::compile(&self.timeline)
    }

    /// Pretty-printed export of the current timeline.
    ///
    /// # Errors
    /// Returns an error only if serialization fails.
    pub fn export_text(&self) -> Result<String, serde_json::Error> {
        compiler::export_json(&self.compile())
    }

    /// Compile the timeline and hand the JSON to `clipboard`.
    ///
    /// A clipboard failure is reported as a notice, not an error; the
    /// timeline is never touched.
    ///
    /// # Errors
    /// Returns an error only if serialization fails.
    pub fn export_to<C: ClipboardProvider + ?Sized>(
        &self,
        clipboard: &mut C,
    ) -> Result<Notice, CoreError> {
        let events = self.compile();
        let text = compiler::export_json(&events)?;
        match clipboard.write_text(&text) {
            Ok(()) => {
                tracing::info!(events = events.len(), "exported rotation");
                Ok(Notice::Exported {
                    events: events.len(),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                Ok(Notice::ClipboardFailed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Ask `prompt` for a payload and import it.
    ///
    /// Cancelled, unreadable, or invalid input leaves the timeline as it was.
    pub fn import_from<P: ClipboardProvider + ?Sized>(&mut self, prompt: &mut P) -> Notice {
        let text = match prompt.read_text() {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => return Notice::ImportCancelled,
            Err(e) => {
                tracing::warn!(error = %e, "import prompt failed");
                return Notice::ClipboardFailed {
                    reason: e.to_string(),
                };
            }
        };

        match self.import_text(&text) {
            Ok(events) => Notice::Imported {
                events,
                blocks: self.timeline.len(),
            },
            Err(e) => Notice::ImportRejected {
                reason: e.to_string(),
            },
        }
    }

    /// Replace the timeline with the rotation in `text`.
    ///
    /// Returns the number of imported events. The payload is fully
    /// validated before anything changes.
    ///
    /// # Errors
    /// Returns [`ImportError::InvalidFormat`] for a malformed payload.
    pub fn import_text(&mut self, text: &str) -> Result<usize, ImportError> {
        let rebuilt = compiler::parse_events(text).and_then(|events| {
            let timeline = compiler::decompile(&events)?;
            Ok((events.len(), timeline))
        });

        match rebuilt {
            Ok((events, timeline)) => {
                tracing::info!(events, blocks = timeline.len(), "imported rotation");
                self.timeline = timeline;
                self.active = None;
                Ok(events)
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected import");
                Err(e)
            }
        }
    }

    pub fn clear(&mut self) {
        self.timeline.clear();
    }
}
