//! Confirmation gate for the stop command.
//!
//! Stopping is only enabled once the user has typed the word `stop`,
//! compared case-insensitively. Anything else, including surrounding
//! whitespace, keeps the gate closed.

/// The phrase that unlocks the stop command.
pub const STOP_PHRASE: &str = "stop";

/// The user's current confirmation input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopConfirmation {
    input: String,
}

impl StopConfirmation {
    /// Replace the current input.
    pub fn set(&mut self, input: &str) {
        input.clone_into(&mut self.input);
    }

    /// Whether the input unlocks the stop command.
    pub fn is_confirmed(&self) -> bool {
        self.input.eq_ignore_ascii_case(STOP_PHRASE)
    }
}
