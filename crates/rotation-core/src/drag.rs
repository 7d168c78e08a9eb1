//! Drag-and-drop boundary.
//!
//! The drag surface reports items and targets as plain identifiers. They
//! are resolved once, on arrival, into [`DragSource`] and [`DropTarget`];
//! everything past this point works with the typed values.

use std::fmt;

use crate::catalog::{Catalog, PaletteItem};
use crate::error::{DragError, TimelineError};
use crate::timeline::{Block, BlockId, Timeline};

const TRASH_ID: &str = "trash-bin";
const SLOT_PREFIX: &str = "timeline-";

/// The item being dragged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSource {
    /// A palette item; dropping it creates a new block.
    Palette(PaletteItem),
    /// A block already on the timeline.
    Placed(BlockId),
}

impl DragSource {
    /// Resolve a drag-surface identifier.
    ///
    /// Palette items use their palette id (`p_ticks_2`, `p_Kick`); placed
    /// blocks use their block id.
    ///
    /// # Errors
    /// Returns [`DragError::UnknownItem`] if the identifier names neither.
    pub fn resolve(raw: &str, catalog: &Catalog) -> Result<Self, DragError> {
        if let Some(item) = catalog.palette_item(raw) {
            return Ok(Self::Palette(item));
        }
        raw.parse::<BlockId>()
            .map(Self::Placed)
            .map_err(|_| DragError::UnknownItem(raw.to_string()))
    }
}

impl fmt::Display for DragSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Palette(item) => write!(f, "{}", item.palette_id()),
            Self::Placed(id) => write!(f, "{id}"),
        }
    }
}

/// Where a drag was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// The insertion point before timeline position `n` (`n == len` is the end).
    Slot(usize),
    Trash,
}

impl DropTarget {
    /// Resolve a drop-target identifier (`timeline-3`, `trash-bin`).
    ///
    /// # Errors
    /// Returns [`DragError::UnknownTarget`] for anything else.
    pub fn resolve(raw: &str) -> Result<Self, DragError> {
        if raw == TRASH_ID {
            return Ok(Self::Trash);
        }
        raw.strip_prefix(SLOT_PREFIX)
            .and_then(|n| n.parse().ok())
            .map(Self::Slot)
            .ok_or_else(|| DragError::UnknownTarget(raw.to_string()))
    }
}

impl fmt::Display for DropTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slot(n) => write!(f, "{SLOT_PREFIX}{n}"),
            Self::Trash => write!(f, "{TRASH_ID}"),
        }
    }
}

/// What a drag-end did to the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Inserted { id: BlockId, index: usize },
    Removed { id: BlockId },
    Moved { from: usize, to: usize },
    Ignored,
}

/// Apply a finished drag to the timeline.
///
/// - released outside any target: nothing happens
/// - placed block onto the trash: the block is removed
/// - palette item onto the trash: nothing happens
/// - palette item onto a slot: a new block is inserted there
/// - placed block onto a slot: the block moves there; slots past the last
///   block move it to the end
///
/// # Errors
/// Returns [`TimelineError::OutOfRange`] if a palette item is dropped on a
/// slot past the end of the timeline.
pub fn apply_drag_end(
    timeline: &mut Timeline,
    source: &DragSource,
    target: Option<DropTarget>,
) -> Result<DragOutcome, TimelineError> {
    let Some(target) = target else {
        return Ok(DragOutcome::Ignored);
    };

    match (source, target) {
        (DragSource::Placed(id), DropTarget::Trash) => Ok(timeline
            .remove_by_id(*id)
            .map_or(DragOutcome::Ignored, |block| DragOutcome::Removed { id: block.id() })),
        (DragSource::Palette(_), DropTarget::Trash) => Ok(DragOutcome::Ignored),
        (DragSource::Palette(item), DropTarget::Slot(index)) => {
            let block = Block::new(item.to_block_kind());
            let id = block.id();
            timeline.insert(index, block)?;
            Ok(DragOutcome::Inserted { id, index })
        }
        (DragSource::Placed(id), DropTarget::Slot(index)) => {
            let Some(from) = timeline.position_of(*id) else {
                return Ok(DragOutcome::Ignored);
            };
            let to = index.min(timeline.len() - 1);
            if from == to {
                return Ok(DragOutcome::Ignored);
            }
            timeline.move_by_index(from, to)?;
            Ok(DragOutcome::Moved { from, to })
        }
    }
}
