//! The ordered block sequence a rotation is built from.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::block::{Block, BlockId};
use crate::error::TimelineError;

/// Ordered sequence of placed blocks.
///
/// Order is significant: the compiler walks it left to right. Block ids
/// are unique within a timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    blocks: Vec<Block>,
}

impl<'de> Deserialize<'de> for Timeline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let blocks = Vec::<Block>::deserialize(deserializer)?;
        Self::from_blocks(blocks).map_err(serde::de::Error::custom)
    }
}

fn ensure_unique(blocks: &[Block]) -> Result<(), TimelineError> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if !seen.insert(block.id()) {
            return Err(TimelineError::DuplicateId(block.id().to_string()));
        }
    }
    Ok(())
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a timeline from blocks, rejecting repeated ids.
    ///
    /// # Errors
    /// Returns [`TimelineError::DuplicateId`] if two blocks share an id.
    pub fn from_blocks(blocks: Vec<Block>) -> Result<Self, TimelineError> {
        ensure_unique(&blocks)?;
        Ok(Self { blocks })
    }

    /// Wrap blocks whose ids were all generated just now.
    pub(crate) fn from_generated(blocks: Vec<Block>) -> Self {
        debug_assert!(ensure_unique(&blocks).is_ok());
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn position_of(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// Read-only view of the blocks in order.
    pub fn snapshot(&self) -> &[Block] {
        &self.blocks
    }

    /// Insert `block` so that it ends up at `index`.
    ///
    /// Blocks at or after `index` shift one slot right.
    ///
    /// # Errors
    /// Returns [`TimelineError::OutOfRange`] if `index > len`, or
    /// [`TimelineError::DuplicateId`] if the block's id is already placed.
    pub fn insert(&mut self, index: usize, block: Block) -> Result<(), TimelineError> {
        if index > self.blocks.len() {
            return Err(TimelineError::OutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        if self.position_of(block.id()).is_some() {
            return Err(TimelineError::DuplicateId(block.id().to_string()));
        }
        tracing::debug!(index, id = %block.id(), label = %block.label(), "insert block");
        self.blocks.insert(index, block);
        Ok(())
    }

    /// Append `block` at the end.
    ///
    /// # Errors
    /// Returns [`TimelineError::DuplicateId`] if the block's id is already placed.
    pub fn push(&mut self, block: Block) -> Result<(), TimelineError> {
        self.insert(self.blocks.len(), block)
    }

    /// Remove the block with `id`, if present.
    ///
    /// Removing an absent id is a no-op so repeated drag-end events are harmless.
    pub fn remove_by_id(&mut self, id: BlockId) -> Option<Block> {
        let index = self.position_of(id)?;
        tracing::debug!(index, %id, "remove block");
        Some(self.blocks.remove(index))
    }

    /// Move the block at `from` to `to`, shifting the blocks in between.
    ///
    /// # Errors
    /// Returns [`TimelineError::OutOfRange`] if either index is not `< len`.
    pub fn move_by_index(&mut self, from: usize, to: usize) -> Result<(), TimelineError> {
        let len = self.blocks.len();
        for index in [from, to] {
            if index >= len {
                return Err(TimelineError::OutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(());
        }
        tracing::debug!(from, to, "move block");
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        Ok(())
    }

    /// Replace every block.
    ///
    /// # Errors
    /// Returns [`TimelineError::DuplicateId`] if two incoming blocks share an
    /// id; the timeline is left unchanged in that case.
    pub fn replace_all(&mut self, blocks: Vec<Block>) -> Result<(), TimelineError> {
        ensure_unique(&blocks)?;
        tracing::debug!(old = self.blocks.len(), new = blocks.len(), "replace timeline");
        self.blocks = blocks;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
