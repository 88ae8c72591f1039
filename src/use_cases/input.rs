// Input listener: turns player signals into a pending shot or a quit request.

use super::types::GamePhase;
use crate::domain::{InputSignal, SignalSource};
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tracing::{debug, info, warn};

/// Single-slot shot request shared between the listener and the loop.
///
/// This is deliberately not a queue: any number of raises before the loop takes the
/// flag produce exactly one shot.
#[derive(Debug, Clone, Default)]
pub struct FireFlag(Arc<AtomicBool>);

impl FireFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Clears the flag and reports whether it was set.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Why the listener returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerExit {
    /// The session finished (or its phase channel went away).
    SessionFinished,
    /// The player asked to quit; the loop has been notified.
    QuitRequested,
    /// The input device closed or failed.
    InputClosed,
}

/// Blocking listener loop; run it on `tokio::task::spawn_blocking`.
///
/// Each wait is bounded by `poll_timeout` so the listener notices the end of the
/// session within one timeout instead of blocking forever on the device.
pub fn run_input_listener<S: SignalSource>(
    mut source: S,
    fire: FireFlag,
    phase_rx: watch::Receiver<GamePhase>,
    shutdown: Arc<Notify>,
    poll_timeout: Duration,
) -> ListenerExit {
    loop {
        if *phase_rx.borrow() == GamePhase::Finished || phase_rx.has_changed().is_err() {
            debug!("input listener stopping, session finished");
            return ListenerExit::SessionFinished;
        }

        match source.wait_for_signal(poll_timeout) {
            Ok(Some(InputSignal::Fire)) => {
                debug!(already_pending = fire.is_raised(), "fire signal");
                fire.raise();
            }
            Ok(Some(InputSignal::Quit)) => {
                info!("quit requested");
                shutdown.notify_one();
                return ListenerExit::QuitRequested;
            }
            Ok(None) => {}
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
                info!("input closed");
                return ListenerExit::InputClosed;
            }
            Err(error) => {
                warn!(%error, "input listener failed");
                return ListenerExit::InputClosed;
            }
        }
    }
}
