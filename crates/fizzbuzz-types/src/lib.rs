//! Shared type definitions for the FizzBuzz ticker.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for sequence item identifiers
//! - [`enums`] -- The [`Label`] computed for each index
//! - [`structs`] -- The [`SequenceItem`] published to observers

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::Label;
pub use ids::ItemId;
pub use structs::SequenceItem;
