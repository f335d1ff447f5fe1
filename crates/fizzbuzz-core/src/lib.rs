//! Sequence state, publisher, and timer-driven engine for the FizzBuzz ticker.
//!
//! This crate owns the only stateful part of the demo: a cursor that walks
//! from 1 to 100 on a fixed 500 ms timer, the list of labels produced so far,
//! and the replay-latest stream that hands every new snapshot to observers.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `fizzbuzz-config.yaml` into
//!   strongly-typed structs.
//! - [`sequence`] -- The label rule, fixed bounds, and the pure
//!   [`SequenceState`](sequence::SequenceState) cursor.
//! - [`publisher`] -- Replay-latest multicast of list snapshots.
//! - [`engine`] -- [`SequenceEngine`]: start/stop/reset and the recurring
//!   timer task.
//!
//! [`SequenceEngine`]: engine::SequenceEngine

pub mod config;
pub mod engine;
pub mod publisher;
pub mod sequence;
