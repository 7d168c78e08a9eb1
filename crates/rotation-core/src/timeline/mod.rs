//! Timeline model.
//!
//! This module provides:
//! - Placed blocks (tick gaps and abilities) with stable identities
//! - The ordered, mutable sequence of blocks a rotation is built from

mod block;
mod sequence;

pub use block::{Block, BlockId, BlockKind};
pub use sequence::Timeline;
