//! Enumeration types for the FizzBuzz ticker.

/// The value produced for a single index of the sequence.
///
/// The textual form (via [`Display`](core::fmt::Display)) is what observers
/// see in [`SequenceItem::value`](crate::SequenceItem::value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Index divisible by 3 but not by 5.
    Fizz,
    /// Index divisible by 5 but not by 3.
    Buzz,
    /// Index divisible by both 3 and 5.
    FizzBuzz,
    /// Any other index, rendered as its decimal string.
    Number(u32),
}

impl core::fmt::Display for Label {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Fizz => f.write_str("Fizz"),
            Self::Buzz => f.write_str("Buzz"),
            Self::FizzBuzz => f.write_str("FizzBuzz"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}
