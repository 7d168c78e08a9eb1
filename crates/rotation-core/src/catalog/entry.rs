//! Catalog entries, sections, and palette items.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroU32;
use std::path::Path;

use crate::error::CatalogError;
use crate::timeline::BlockKind;

/// Tick-gap lengths offered by the palette.
pub const TICK_LENGTHS: [u32; 6] = [1, 2, 3, 4, 5, 6];

const BUNDLED_CATALOG: &str = include_str!("abilities.toml");

const PALETTE_PREFIX: &str = "p_";
const PALETTE_TICKS_PREFIX: &str = "p_ticks_";

/// A named ability the palette offers, tagged with its section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub section: String,
    pub name: String,
}

/// An ordered group of catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub name: String,
    pub entries: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    name: String,
    #[serde(default)]
    abilities: Vec<String>,
}

/// Read-only registry of everything that can be dragged onto the timeline.
///
/// Built once at startup and passed by reference to whatever needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    /// The catalog bundled with the library.
    ///
    /// # Panics
    /// Panics if the bundled catalog is malformed, which the test suite rules out.
    /// Use [`from_toml_str`](Self::from_toml_str) for user-supplied data.
    pub fn builtin() -> Self {
        Self::from_toml_str(BUNDLED_CATALOG).expect("bundled catalog must be valid")
    }

    /// Parse a catalog from TOML text.
    ///
    /// # Errors
    /// Returns an error if the text is not valid TOML, a section or ability
    /// name is empty, or an ability name appears more than once.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = toml::from_str(content)?;
        let mut seen = HashSet::new();
        let mut sections = Vec::with_capacity(raw.sections.len());

        for raw_section in raw.sections {
            let section_name = raw_section.name.trim().to_string();
            if section_name.is_empty() {
                return Err(CatalogError::EmptyName {
                    section: raw_section.name,
                });
            }

            let mut entries = Vec::with_capacity(raw_section.abilities.len());
            for ability in raw_section.abilities {
                if ability.trim().is_empty() {
                    return Err(CatalogError::EmptyName {
                        section: section_name,
                    });
                }
                if !seen.insert(ability.clone()) {
                    return Err(CatalogError::DuplicateEntry(ability));
                }
                entries.push(CatalogEntry {
                    section: section_name.clone(),
                    name: ability,
                });
            }

            sections.push(Section {
                name: section_name,
                entries,
            });
        }

        Ok(Self { sections })
    }

    /// Load a catalog from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or fails validation.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            entries = catalog.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Sections in palette order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// All entries, flattened in section order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up an entry by exact name.
    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries().find(|e| e.name == name)
    }

    /// The tick-gap palette, shortest first.
    pub fn tick_palette(&self) -> Vec<PaletteItem> {
        TICK_LENGTHS
            .iter()
            .filter_map(|&len| NonZeroU32::new(len))
            .map(PaletteItem::Ticks)
            .collect()
    }

    /// Resolve a palette identifier (`p_ticks_3`, `p_Kick`) to its item.
    pub fn palette_item(&self, id: &str) -> Option<PaletteItem> {
        if let Some(len) = id.strip_prefix(PALETTE_TICKS_PREFIX) {
            let len: u32 = len.parse().ok()?;
            if !TICK_LENGTHS.contains(&len) {
                return None;
            }
            return NonZeroU32::new(len).map(PaletteItem::Ticks);
        }
        let name = id.strip_prefix(PALETTE_PREFIX)?;
        self.find(name).cloned().map(PaletteItem::Ability)
    }
}

/// Something the palette offers for placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteItem {
    Ticks(NonZeroU32),
    Ability(CatalogEntry),
}

impl PaletteItem {
    /// Identifier used by the drag surface for this palette item.
    pub fn palette_id(&self) -> String {
        match self {
            Self::Ticks(len) => format!("{PALETTE_TICKS_PREFIX}{len}"),
            Self::Ability(entry) => format!("{PALETTE_PREFIX}{}", entry.name),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Ticks(len) if len.get() == 1 => "1 tick".to_string(),
            Self::Ticks(len) => format!("{len} ticks"),
            Self::Ability(entry) => entry.name.clone(),
        }
    }

    /// The block contents a drop of this item creates.
    pub fn to_block_kind(&self) -> BlockKind {
        match self {
            Self::Ticks(length) => BlockKind::Ticks { length: *length },
            Self::Ability(entry) => BlockKind::Ability {
                ability: entry.name.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_sections_in_order() {
        let catalog = Catalog::builtin();
        let names: Vec<&str> = catalog.sections().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Melee", "Range", "Magic", "Necromancy", "Defence", "Misc", "Gear", "Text"]
        );
        assert!(catalog.len() > 200);
    }

    #[test]
    fn builtin_catalog_contains_known_abilities() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.find("Kick").unwrap().section, "Melee");
        assert_eq!(catalog.find("Text: P1").unwrap().section, "Text");
        assert!(catalog.find("kick").is_none());
    }

    #[test]
    fn list_sections_is_restartable() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.sections(), catalog.sections());
        let first: Vec<_> = catalog.entries().take(3).cloned().collect();
        let again: Vec<_> = catalog.entries().take(3).cloned().collect();
        assert_eq!(first, again);
    }

    #[test]
    fn tick_palette_is_one_through_six() {
        let catalog = Catalog::builtin();
        let labels: Vec<String> = catalog.tick_palette().iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            vec!["1 tick", "2 ticks", "3 ticks", "4 ticks", "5 ticks", "6 ticks"]
        );
    }

    #[test]
    fn palette_ids_resolve() {
        let catalog = Catalog::builtin();
        let ticks = catalog.palette_item("p_ticks_3").unwrap();
        assert_eq!(ticks, PaletteItem::Ticks(NonZeroU32::new(3).unwrap()));
        assert_eq!(ticks.palette_id(), "p_ticks_3");

        let kick = catalog.palette_item("p_Kick").unwrap();
        assert_eq!(kick.label(), "Kick");
        assert_eq!(kick.palette_id(), "p_Kick");

        assert!(catalog.palette_item("p_ticks_7").is_none());
        assert!(catalog.palette_item("p_ticks_0").is_none());
        assert!(catalog.palette_item("p_Nonexistent").is_none());
        assert!(catalog.palette_item("Kick").is_none());
    }

    #[test]
    fn custom_catalog_parses() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[sections]]
            name = "Basics"
            abilities = ["Kick", "Slice"]

            [[sections]]
            name = "Empty"
            "#,
        )
        .unwrap();
        assert_eq!(catalog.sections().len(), 2);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.sections()[1].entries.is_empty());
    }

    #[test]
    fn catalog_rejects_duplicates_and_empty_names() {
        let dup = Catalog::from_toml_str(
            r#"
            [[sections]]
            name = "A"
            abilities = ["Kick"]
            [[sections]]
            name = "B"
            abilities = ["Kick"]
            "#,
        );
        assert!(matches!(dup, Err(CatalogError::DuplicateEntry(name)) if name == "Kick"));

        let empty = Catalog::from_toml_str(
            r#"
            [[sections]]
            name = "A"
            abilities = [" "]
            "#,
        );
        assert!(matches!(empty, Err(CatalogError::EmptyName { .. })));

        let blank_section = Catalog::from_toml_str(
            r#"
            [[sections]]
            name = " "
            abilities = ["Kick"]
            "#,
        );
        assert!(matches!(blank_section, Err(CatalogError::EmptyName { section }) if section == " "));

        assert!(matches!(
            Catalog::from_toml_str("sections = 3"),
            Err(CatalogError::ParseFailed(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "[[sections]]\nname = \"X\"\nabilities = [\"Zap\"]\n").unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.find("Zap").unwrap().section, "X");

        let missing = Catalog::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(CatalogError::LoadFailed { .. })));
    }
}
