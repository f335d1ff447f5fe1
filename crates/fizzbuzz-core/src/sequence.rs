//! The FizzBuzz rule and the cursor that walks the fixed range.
//!
//! [`SequenceState`] is plain data: it knows nothing about timers or
//! observers. The [`engine`](crate::engine) drives it once per tick and
//! publishes the result.
//!
//! Invariant: between advances, `items().len() == next_index() - 1`.

use std::time::Duration;

use fizzbuzz_types::{Label, SequenceItem};

/// First index of the sequence.
pub const LOWER_BOUND: u32 = 1;

/// Last index of the sequence (inclusive).
pub const UPPER_BOUND: u32 = 100;

/// Wall-clock time between two ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Compute the label for index `n`.
pub const fn label(n: u32) -> Label {
    match (n % 3 == 0, n % 5 == 0) {
        (true, true) => Label::FizzBuzz,
        (true, false) => Label::Fizz,
        (false, true) => Label::Buzz,
        (false, false) => Label::Number(n),
    }
}

/// Outcome of a single [`SequenceState::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// An item was appended for this index.
    Appended(u32),
    /// The cursor is past [`UPPER_BOUND`]; nothing was appended.
    Exhausted,
}

/// Accumulated list plus the cursor of the next index to label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceState {
    items: Vec<SequenceItem>,
    next_index: u32,
}

impl SequenceState {
    /// Create an empty state positioned at [`LOWER_BOUND`].
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            next_index: LOWER_BOUND,
        }
    }

    /// Append the item for the current index and move the cursor forward.
    ///
    /// Returns [`Advance::Exhausted`] without touching the list once the
    /// cursor has passed [`UPPER_BOUND`].
    pub fn advance(&mut self) -> Advance {
        let index = self.next_index;
        if index > UPPER_BOUND {
            return Advance::Exhausted;
        }

        self.items.push(SequenceItem::new(label(index)));
        // index <= UPPER_BOUND, so this never saturates.
        self.next_index = index.saturating_add(1);
        Advance::Appended(index)
    }

    /// Clear the list and rewind the cursor to [`LOWER_BOUND`].
    pub fn reset(&mut self) {
        self.items.clear();
        self.next_index = LOWER_BOUND;
    }

    /// Items produced so far, in generation order.
    pub fn items(&self) -> &[SequenceItem] {
        &self.items
    }

    /// The index the next advance will label.
    pub const fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Whether every index up to [`UPPER_BOUND`] has been produced.
    pub const fn is_exhausted(&self) -> bool {
        self.next_index > UPPER_BOUND
    }
}

impl Default for SequenceState {
    fn default() -> Self {
        Self::new()
    }
}
