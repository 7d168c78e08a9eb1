//! # Rotation Core Library
//!
//! This library provides the business logic for the rotation builder: a tool
//! for laying out a time-ordered sequence of ability activations by dragging
//! tick gaps and abilities onto a timeline, then exporting the result as a
//! `{tick, ability}` JSON list. Front ends (the CLI, or any drag-and-drop
//! surface) are thin layers that forward their events to this crate.
//!
//! ## Architecture
//!
//! - **Catalog**: Read-only palette of tick gaps and sectioned ability names,
//!   with approximate name search
//! - **Timeline**: Ordered sequence of placed blocks with stable identities
//! - **Compiler**: Timeline to exported rotation and back
//! - **Drag**: Typed resolution of drag-surface identifiers and drop handling
//! - **Editor**: Session controller tying the above to clipboard and prompt
//!
//! ## Key Components
//!
//! - [`Catalog`]: Static block catalog
//! - [`Timeline`]: The editable rotation
//! - [`compile`] / [`decompile`]: Tick accounting in both directions
//! - [`RotationEditor`]: Event handlers for a front end
//! - [`Config`]: Application configuration management

pub mod catalog;
pub mod clipboard;
pub mod compiler;
pub mod drag;
pub mod editor;
pub mod error;
pub mod events;
pub mod storage;
pub mod timeline;

pub use catalog::{Catalog, CatalogEntry, PaletteItem, SearchOptions, Section, TICK_LENGTHS};
pub use clipboard::{ClipboardProvider, MemoryClipboard};
pub use compiler::{compile, decompile, export_json, parse_events, ExportedEvent, START_TICK};
pub use drag::{apply_drag_end, DragOutcome, DragSource, DropTarget};
pub use editor::RotationEditor;
pub use error::{
    CatalogError, ClipboardError, ConfigError, CoreError, DragError, ImportError, TimelineError,
};
pub use events::Notice;
pub use storage::Config;
pub use timeline::{Block, BlockId, BlockKind, Timeline};
