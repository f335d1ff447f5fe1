//! Entity structs published by the sequence engine.

use serde::{Deserialize, Serialize};

use crate::enums::Label;
use crate::ids::ItemId;

/// One emitted entry of the sequence.
///
/// The `id` lets a renderer track rows across snapshots; two items with the
/// same `value` (e.g. `"Fizz"` before and after a reset) are still distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceItem {
    /// Identifier unique across every item produced by the process.
    pub id: ItemId,
    /// `"Fizz"`, `"Buzz"`, `"FizzBuzz"`, or the decimal index.
    pub value: String,
}

impl SequenceItem {
    /// Build a new item for `label` with a freshly generated id.
    pub fn new(label: Label) -> Self {
        Self {
            id: ItemId::new(),
            value: label.to_string(),
        }
    }
}
