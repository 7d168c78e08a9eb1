//! Tick compiler: timeline <-> exported rotation.
//!
//! `compile` walks the timeline left to right with a running tick counter
//! that starts at [`START_TICK`]. Tick gaps advance the counter; abilities
//! emit `{tick, ability}` at the current counter value without advancing it.
//!
//! `decompile` rebuilds a timeline from exported events, inserting a tick
//! gap before each event whose tick is ahead of the previous one. It
//! starts from tick 0, not [`START_TICK`], so the two transforms are not
//! inverses: `decompile(compile(t))` front-loads 4 extra ticks.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::error::ImportError;
use crate::timeline::{Block, BlockKind, Timeline};

/// Tick at which the first action becomes executable.
pub const START_TICK: i64 = 4;

/// One timed ability activation in an exported rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedEvent {
    pub tick: i64,
    pub ability: String,
}

impl ExportedEvent {
    pub fn new(tick: i64, ability: impl Into<String>) -> Self {
        Self {
            tick,
            ability: ability.into(),
        }
    }
}

/// Flatten a timeline into timed ability events.
pub fn compile(timeline: &Timeline) -> Vec<ExportedEvent> {
    let mut tick = START_TICK;
    let mut events = Vec::new();

    for block in timeline {
        match block.kind() {
            BlockKind::Ticks { length } => tick = tick.saturating_add(i64::from(length.get())),
            BlockKind::Ability { ability } => events.push(ExportedEvent::new(tick, ability.clone())),
        }
    }

    events
}

/// Rebuild a timeline from events, in the order given.
///
/// Every block gets a fresh id. A non-positive gap between consecutive
/// events produces no tick block.
///
/// # Errors
/// Returns [`ImportError::InvalidFormat`] if a gap is too large for a
/// single tick block.
pub fn decompile(events: &[ExportedEvent]) -> Result<Timeline, ImportError> {
    let mut blocks = Vec::with_capacity(events.len() * 2);
    let mut last_tick: i64 = 0;

    for (index, event) in events.iter().enumerate() {
        let gap = event.tick.saturating_sub(last_tick);
        if gap > 0 {
            let length = u32::try_from(gap)
                .ok()
                .and_then(NonZeroU32::new)
                .ok_or_else(|| {
                    ImportError::InvalidFormat(format!(
                        "element {index}: gap of {gap} ticks is too large"
                    ))
                })?;
            blocks.push(Block::ticks(length));
        }
        blocks.push(Block::ability(event.ability.clone()));
        last_tick = event.tick;
    }

    Ok(Timeline::from_generated(blocks))
}

/// Validate an import payload and extract its events.
///
/// The payload must be a JSON array whose elements are objects with a
/// numeric `tick` and a string `ability`. Other fields are ignored.
/// Integral floats such as `7.0` are accepted as ticks.
///
/// # Errors
/// Returns [`ImportError::InvalidFormat`] describing the first problem found.
pub fn parse_events(text: &str) -> Result<Vec<ExportedEvent>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ImportError::InvalidFormat(format!("invalid JSON: {e}")))?;

    let items = value
        .as_array()
        .ok_or_else(|| ImportError::InvalidFormat("expected a JSON array".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let tick = item
                .get("tick")
                .and_then(tick_value)
                .ok_or_else(|| {
                    ImportError::InvalidFormat(format!("element {index}: missing numeric 'tick'"))
                })?;
            let ability = item
                .get("ability")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| {
                    ImportError::InvalidFormat(format!("element {index}: missing string 'ability'"))
                })?;
            Ok(ExportedEvent::new(tick, ability))
        })
        .collect()
}

fn tick_value(value: &serde_json::Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Pretty-printed export text.
///
/// # Errors
/// Returns an error only if serialization itself fails.
pub fn export_json(events: &[ExportedEvent]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(events)
}
