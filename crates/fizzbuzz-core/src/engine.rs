//! The timer-driven sequence engine.
//!
//! [`SequenceEngine`] owns a [`SequenceState`], a [`ListPublisher`], and at
//! most one recurring timer task. Every tick advances the cursor by one and
//! publishes the full list. Once the cursor passes the upper bound the
//! timer stops itself.
//!
//! # Run state
//!
//! Whether the sequence is advancing is tracked by an explicit
//! run state: `Idle` or `Running` with the token of the timer that was
//! spawned for that run. A timer task only mutates state while its token is
//! still the current one, so a tick that was already in flight when
//! [`stop`](SequenceEngine::stop) ran is discarded instead of appending
//! after the stop.
//!
//! # Locking
//!
//! All commands and ticks serialize on one mutex, and publishing happens
//! while it is held, so observers see mutations in the order they were
//! made. Observers are called with that lock held and must not call back
//! into the engine.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use fizzbuzz_types::SequenceItem;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::publisher::{ListObserver, ListPublisher, Subscription};
use crate::sequence::{Advance, SequenceState, TICK_INTERVAL, UPPER_BOUND};

/// Identifies the timer task of one start/stop run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunToken(u64);

impl RunToken {
    const fn get(self) -> u64 {
        self.0
    }
}

/// Whether a timer is currently driving the sequence.
#[derive(Debug)]
enum RunState {
    /// No timer; the list only changes on reset.
    Idle,
    /// A timer task is alive and tagged with `token`.
    Running {
        token: RunToken,
        timer: JoinHandle<()>,
    },
}

impl RunState {
    const fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    fn is_current(&self, candidate: RunToken) -> bool {
        matches!(self, Self::Running { token, .. } if *token == candidate)
    }
}

#[derive(Debug)]
struct EngineCore {
    state: SequenceState,
    run: RunState,
    next_token: u64,
}

#[derive(Debug)]
struct Shared {
    core: Mutex<EngineCore>,
    publisher: ListPublisher,
    runtime: Handle,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, EngineCore> {
        self.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Handle one timer firing. Returns `false` when the timer task should
    /// exit.
    fn tick(&self, token: RunToken) -> bool {
        let mut core = self.lock();
        if !core.run.is_current(token) {
            trace!(run = token.get(), "Discarding tick from a stale timer");
            return false;
        }

        match core.state.advance() {
            Advance::Appended(index) => {
                self.publisher.publish(core.state.items());
                trace!(run = token.get(), index, "Sequence advanced");
                true
            }
            Advance::Exhausted => {
                // Dropping our own JoinHandle detaches; the task returns next.
                core.run = RunState::Idle;
                info!(
                    run = token.get(),
                    upper_bound = UPPER_BOUND,
                    "Sequence complete, timer stopped"
                );
                false
            }
        }
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        let core = self.core.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let RunState::Running { timer, .. } = &core.run {
            timer.abort();
        }
    }
}

/// The stateful FizzBuzz generator.
///
/// Cloning yields another handle to the same engine. Commands are
/// synchronous, infallible, and return immediately; the only waiting is
/// done by the timer task between ticks.
#[derive(Debug, Clone)]
pub struct SequenceEngine {
    shared: Arc<Shared>,
}

impl SequenceEngine {
    /// Create an idle engine with an empty list and the cursor at 1.
    ///
    /// Timer tasks are spawned on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(EngineCore {
                    state: SequenceState::new(),
                    run: RunState::Idle,
                    next_token: 0,
                }),
                publisher: ListPublisher::new(),
                runtime,
            }),
        }
    }

    /// Begin advancing once every [`TICK_INTERVAL`]. No-op when already
    /// running.
    pub fn start(&self) {
        let mut core = self.shared.lock();
        if core.run.is_running() {
            debug!("Start ignored, sequence already running");
            return;
        }

        let token = RunToken(core.next_token);
        core.next_token = core.next_token.wrapping_add(1);
        let timer = self
            .shared
            .runtime
            .spawn(drive(Arc::downgrade(&self.shared), token));
        core.run = RunState::Running { token, timer };

        info!(
            run = token.get(),
            next_index = core.state.next_index(),
            exhausted = core.state.is_exhausted(),
            interval = ?TICK_INTERVAL,
            "Sequence started"
        );
    }

    /// Cancel the timer. No-op when not running.
    pub fn stop(&self) {
        let mut core = self.shared.lock();
        match std::mem::replace(&mut core.run, RunState::Idle) {
            RunState::Running { token, timer } => {
                timer.abort();
                info!(
                    run = token.get(),
                    next_index = core.state.next_index(),
                    "Sequence stopped"
                );
            }
            RunState::Idle => debug!("Stop ignored, sequence not running"),
        }
    }

    /// Clear the list, rewind the cursor to 1, and publish the empty list.
    ///
    /// The timer is left alone: a running sequence continues from 1 on its
    /// next tick.
    pub fn reset(&self) {
        let mut core = self.shared.lock();
        core.state.reset();
        self.shared.publisher.publish(core.state.items());
        info!(running = core.run.is_running(), "Sequence reset");
    }

    /// Register `observer` for list snapshots.
    ///
    /// The observer is called once with the current list before this
    /// returns, then after every advance and reset. Drop or
    /// [`release`](Subscription::release) the returned handle to stop
    /// delivery.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: ListObserver + 'static,
    {
        self.shared.publisher.subscribe(observer)
    }

    /// Whether a timer is currently driving the sequence.
    pub fn is_running(&self) -> bool {
        self.shared.lock().run.is_running()
    }

    /// Clone of the current list.
    pub fn items(&self) -> Vec<SequenceItem> {
        self.shared.lock().state.items().to_vec()
    }

    /// The index the next tick will label.
    pub fn next_index(&self) -> u32 {
        self.shared.lock().state.next_index()
    }
}

/// Timer task body: fire every [`TICK_INTERVAL`], starting one interval
/// after spawn, until the engine is gone or the run is no longer current.
async fn drive(shared: Weak<Shared>, token: RunToken) {
    let mut interval = time::interval(TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        let Some(engine) = shared.upgrade() else {
            return;
        };
        if !engine.tick(token) {
            return;
        }
    }
}
