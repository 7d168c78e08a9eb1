//! Placed timeline blocks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of a placed block.
///
/// Generated when the block is created and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    /// A fresh, never-before-seen identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for compact listings.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BlockId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// What a block contributes to the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "blockType", rename_all = "lowercase")]
pub enum BlockKind {
    /// Advances the tick counter without producing output.
    Ticks { length: NonZeroU32 },
    /// Emits one ability activation at the current tick.
    Ability { ability: String },
}

/// A unit placed on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    #[serde(flatten)]
    kind: BlockKind,
}

impl Block {
    /// Create a block with a freshly generated id.
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: BlockId::generate(),
            kind,
        }
    }

    pub fn ticks(length: NonZeroU32) -> Self {
        Self::new(BlockKind::Ticks { length })
    }

    pub fn ability(name: impl Into<String>) -> Self {
        Self::new(BlockKind::Ability {
            ability: name.into(),
        })
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn kind(&self) -> &BlockKind {
        &self.kind
    }

    pub fn label(&self) -> String {
        match &self.kind {
            BlockKind::Ticks { length } if length.get() == 1 => "1 tick".to_string(),
            BlockKind::Ticks { length } => format!("{length} ticks"),
            BlockKind::Ability { ability } => ability.clone(),
        }
    }
}
