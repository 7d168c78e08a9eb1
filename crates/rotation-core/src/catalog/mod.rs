//! Block catalog: the palette of placeable tick gaps and abilities.
//!
//! This module provides:
//! - The bundled ability list grouped into sections
//! - Palette items with their drag identifiers
//! - Approximate name search over the flattened catalog

mod entry;
mod search;

pub use entry::{Catalog, CatalogEntry, PaletteItem, Section, TICK_LENGTHS};
pub use search::{score_name, SearchOptions, DEFAULT_THRESHOLD, MAX_PATTERN_LEN};
