//! Stopping a running engine from another thread.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

/// Create a linked handle/signal pair.
///
/// Give the [`ShutdownSignal`] to [`Engine::run`][crate::Engine::run] and
/// keep the [`ShutdownHandle`] (cloneable) wherever the stop decision is made.
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (ShutdownHandle { tx }, ShutdownSignal { rx })
}

/// Requests shutdown.  Dropping every handle counts as a request too.
#[derive(Clone, Debug)]
pub struct ShutdownHandle {
    tx: Sender<()>,
}

impl ShutdownHandle {
    pub fn trigger(&self) {
        // A full channel already carries a pending request.
        let _ = self.tx.try_send(());
    }
}

/// Observed by the run loop between ticks.
///
/// Clones watch the same channel: dropping every handle stops all of them,
/// while [`ShutdownHandle::trigger`] wakes a single waiter.
#[derive(Clone, Debug)]
pub struct ShutdownSignal {
    rx: Receiver<()>,
}

impl ShutdownSignal {
    /// A signal that never fires; the loop then ends only via `max_ticks`.
    pub fn never() -> Self {
        Self { rx: crossbeam_channel::never() }
    }

    /// Block for up to `timeout`.  Returns `true` as soon as shutdown has
    /// been requested, `false` once the timeout elapses without one.
    pub fn wait(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => true,
            Err(RecvTimeoutError::Timeout)               => false,
        }
    }

    /// Non-blocking check.
    pub fn is_triggered(&self) -> bool {
        match self.rx.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => true,
            Err(TryRecvError::Empty)                 => false,
        }
    }
}
