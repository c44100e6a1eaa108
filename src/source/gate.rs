//! Readiness gate for the music source
//!
//! The gate owns the readiness state and the callbacks waiting on it. State
//! changes go through `transition`, which swaps the state, drains the pending
//! callbacks and publishes the new state in one critical section.

use parking_lot::Mutex;
use tokio::sync::watch;

/// Lifecycle of a music source load
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    Created,
    Initializing,
    Initialized,
    Error,
}

impl Readiness {
    pub fn is_terminal(self) -> bool {
        matches!(self, Readiness::Initialized | Readiness::Error)
    }

    fn rank(self) -> u8 {
        match self {
            Readiness::Created => 0,
            Readiness::Initializing => 1,
            Readiness::Initialized | Readiness::Error => 2,
        }
    }
}

type ReadyCallback = Box<dyn FnOnce(bool) + Send>;

struct GateInner {
    state: Readiness,
    listeners: Vec<ReadyCallback>,
}

pub struct ReadinessGate {
    inner: Mutex<GateInner>,
    state_tx: watch::Sender<Readiness>,
}

impl ReadinessGate {
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(Readiness::Created);
        Self {
            inner: Mutex::new(GateInner {
                state: Readiness::Created,
                listeners: Vec::new(),
            }),
            state_tx,
        }
    }

    pub fn state(&self) -> Readiness {
        self.inner.lock().state
    }

    /// Move to `next`. Only forward moves are accepted and a terminal state is final.
    ///
    /// Entering a terminal state hands every queued callback the success flag.
    /// Callbacks run after the lock is released, so they may call back into the gate.
    pub fn transition(&self, next: Readiness) -> bool {
        let drained = {
            let mut inner = self.inner.lock();
            if inner.state.is_terminal() || next.rank() <= inner.state.rank() {
                tracing::debug!(current = ?inner.state, requested = ?next, "Ignoring readiness transition");
                return false;
            }

            inner.state = next;
            self.state_tx.send_replace(next);

            if next.is_terminal() {
                std::mem::take(&mut inner.listeners)
            } else {
                Vec::new()
            }
        };

        if next.is_terminal() {
            let success = next == Readiness::Initialized;
            tracing::debug!(success, callbacks = drained.len(), "Readiness reached terminal state");
            for callback in drained {
                callback(success);
            }
        }
        true
    }

    /// Run `callback` once the gate is terminal.
    ///
    /// Returns `true` if it ran immediately, `false` if it was queued.
    pub fn when_ready<F>(&self, callback: F) -> bool
    where
        F: FnOnce(bool) + Send + 'static,
    {
        let mut inner = self.inner.lock();
        match inner.state {
            Readiness::Created | Readiness::Initializing => {
                inner.listeners.push(Box::new(callback));
                false
            }
            state => {
                drop(inner);
                callback(state == Readiness::Initialized);
                true
            }
        }
    }

    /// Resolve once the gate is terminal, with the success flag
    pub async fn ready(&self) -> bool {
        let mut rx = self.state_tx.subscribe();
        match rx.wait_for(|state| state.is_terminal()).await {
            Ok(state) => *state == Readiness::Initialized,
            Err(_) => false,
        }
    }

    pub fn pending_callbacks(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn transitions_only_move_forward() {
        let gate = ReadinessGate::new();
        assert!(gate.transition(Readiness::Initializing));
        assert!(!gate.transition(Readiness::Initializing));
        assert!(!gate.transition(Readiness::Created));
        assert!(gate.transition(Readiness::Error));
        assert!(!gate.transition(Readiness::Initialized));
        assert_eq!(gate.state(), Readiness::Error);
    }

    #[test]
    fn queued_callbacks_fire_once_on_terminal_transition() {
        let gate = ReadinessGate::new();
        gate.transition(Readiness::Initializing);

        let calls = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            assert!(!gate.when_ready(move |ok| {
                assert!(ok);
                calls.fetch_add(1, Ordering::SeqCst);
            }));
        }
        assert_eq!(gate.pending_callbacks(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        gate.transition(Readiness::Initialized);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(gate.pending_callbacks(), 0);

        // A rejected transition must not replay anything
        gate.transition(Readiness::Error);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn callback_may_register_another_from_inside() {
        let gate = Arc::new(ReadinessGate::new());
        gate.transition(Readiness::Initializing);

        let inner_ran = Arc::new(AtomicUsize::new(0));
        let gate_for_cb = Arc::clone(&gate);
        let inner_for_cb = Arc::clone(&inner_ran);
        gate.when_ready(move |_| {
            let inner = Arc::clone(&inner_for_cb);
            let immediate = gate_for_cb.when_ready(move |ok| {
                assert!(!ok);
                inner.fetch_add(1, Ordering::SeqCst);
            });
            assert!(immediate);
        });

        gate.transition(Readiness::Error);
        assert_eq!(inner_ran.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ready_resolves_for_early_and_late_waiters() {
        let gate = Arc::new(ReadinessGate::new());
        gate.transition(Readiness::Initializing);

        let waiter = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.ready().await })
        };
        tokio::task::yield_now().await;

        gate.transition(Readiness::Initialized);
        assert!(waiter.await.unwrap());
        assert!(gate.ready().await);
    }
}
