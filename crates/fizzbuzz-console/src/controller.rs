//! Presentation controller bridging the console to the sequence engine.
//!
//! The controller subscribes one observer to the engine's list stream,
//! forwards the three commands, and guards `stop` behind the
//! [`StopConfirmation`] gate. Disposing it (explicitly or by drop) releases
//! the subscription and stops the engine so no timer outlives the UI.

use fizzbuzz_core::engine::SequenceEngine;
use fizzbuzz_core::publisher::{ListObserver, Subscription};
use tracing::{debug, info};

use crate::confirm::{StopConfirmation, STOP_PHRASE};

/// Errors returned by controller commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControllerError {
    /// `stop` was invoked while the confirmation gate was closed.
    #[error("stop is disabled until you confirm with \"{}\"", STOP_PHRASE)]
    StopNotConfirmed,
}

/// Point-in-time view of the engine for the `status` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    /// Whether a timer is driving the sequence.
    pub running: bool,
    /// The index the next tick will label.
    pub next_index: u32,
    /// Number of items produced so far.
    pub items: usize,
    /// Whether the stop command is currently enabled.
    pub stop_enabled: bool,
}

/// Console-side owner of the engine subscription and stop gate.
#[derive(Debug)]
pub struct PresentationController {
    engine: SequenceEngine,
    subscription: Option<Subscription>,
    confirmation: StopConfirmation,
}

impl PresentationController {
    /// Subscribe `observer` to `engine` and take ownership of the
    /// subscription. The observer receives the current list immediately.
    pub fn attach<O>(engine: SequenceEngine, observer: O) -> Self
    where
        O: ListObserver + 'static,
    {
        let subscription = engine.subscribe(observer);
        debug!("Presentation controller attached");
        Self {
            engine,
            subscription: Some(subscription),
            confirmation: StopConfirmation::default(),
        }
    }

    /// Forward `start` to the engine.
    pub fn start(&self) {
        self.engine.start();
    }

    /// Forward `reset` to the engine.
    pub fn reset(&self) {
        self.engine.reset();
    }

    /// Record the user's confirmation input.
    pub fn set_confirmation(&mut self, input: &str) {
        self.confirmation.set(input);
    }

    /// Whether the stop command is enabled.
    pub fn can_stop(&self) -> bool {
        self.confirmation.is_confirmed()
    }

    /// Forward `stop` to the engine if the confirmation gate is open.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::StopNotConfirmed`] without touching the
    /// engine when the gate is closed.
    pub fn stop(&self) -> Result<(), ControllerError> {
        if !self.can_stop() {
            return Err(ControllerError::StopNotConfirmed);
        }
        self.engine.stop();
        Ok(())
    }

    /// Snapshot of engine and gate state.
    pub fn status(&self) -> Status {
        Status {
            running: self.engine.is_running(),
            next_index: self.engine.next_index(),
            items: self.engine.items().len(),
            stop_enabled: self.can_stop(),
        }
    }

    /// Release the subscription and stop the engine.
    pub fn dispose(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
            self.engine.stop();
            info!("Presentation controller disposed");
        }
    }
}

impl Drop for PresentationController {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use fizzbuzz_types::SequenceItem;
    use tokio::runtime::Handle;

    use super::*;

    fn counting_controller() -> (PresentationController, SequenceEngine, Arc<Mutex<usize>>) {
        let engine = SequenceEngine::new(Handle::current());
        let count = Arc::new(Mutex::new(0_usize));
        let sink = Arc::clone(&count);
        let controller = PresentationController::attach(engine.clone(), move |_: &[SequenceItem]| {
            let mut count = sink.lock().unwrap();
            *count = count.saturating_add(1);
        });
        (controller, engine, count)
    }

    #[tokio::test]
    async fn attach_replays_current_list() {
        let (_controller, _engine, count) = counting_controller();
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn stop_is_gated() {
        let (mut controller, engine, _count) = counting_controller();
        controller.start();

        assert_eq!(controller.stop(), Err(ControllerError::StopNotConfirmed));
        assert!(engine.is_running());

        controller.set_confirmation("nope");
        assert!(!controller.can_stop());
        assert!(controller.stop().is_err());

        controller.set_confirmation("STOP");
        assert!(controller.can_stop());
        assert_eq!(controller.stop(), Ok(()));
        assert!(!engine.is_running());
    }

    #[tokio::test]
    async fn reset_is_forwarded_and_published() {
        let (controller, engine, count) = counting_controller();
        controller.reset();
        assert!(engine.items().is_empty());
        assert_eq!(*count.lock().unwrap(), 2);
    }

    #[tokio::test]
    async fn status_reflects_engine() {
        let (mut controller, _engine, _count) = counting_controller();
        controller.start();
        controller.set_confirmation("stop");
        let status = controller.status();
        assert!(status.running);
        assert_eq!(status.next_index, 1);
        assert_eq!(status.items, 0);
        assert!(status.stop_enabled);
    }

    #[tokio::test]
    async fn dispose_stops_engine_and_delivery() {
        let (controller, engine, count) = counting_controller();
        controller.start();
        controller.dispose();

        assert!(!engine.is_running());
        engine.reset();
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn drop_behaves_like_dispose() {
        let (controller, engine, count) = counting_controller();
        controller.start();
        drop(controller);

        assert!(!engine.is_running());
        engine.reset();
        assert_eq!(*count.lock().unwrap(), 1);
    }
}
