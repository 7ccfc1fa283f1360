//! Coalescing throttle for artifact regeneration.
//!
//! The throttle never runs anything itself. [`Throttle::trigger`] decides
//! whether a call runs immediately, is parked in the single pending slot,
//! or is dropped; the owner polls [`Throttle::deadline`] and calls
//! [`Throttle::fire_due`] when it passes.
//!
//! ```text
//! calls:    x   x  x     x                 x
//! window:   |-------|-------|              |-------|
//! runs:     x       x(trailing)            x
//! ```

use tokio::sync::oneshot;
use tokio::time::{Duration, Instant};

/// Window used for declaration regeneration.
pub const ARTIFACT_THROTTLE: Duration = Duration::from_millis(500);

/// A parked call was replaced by a newer one before it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("throttled call was superseded")]
pub struct Cancelled;

/// Resolves once a deferred call ran or was superseded.
pub type Completion = oneshot::Receiver<Result<(), Cancelled>>;

/// Outcome of [`Throttle::trigger`].
#[derive(Debug)]
pub enum Fire {
    /// Run the action now.
    Now,
    /// Parked until the trailing edge.
    Deferred(Completion),
    /// Neither edge applies.
    Dropped,
}

impl Fire {
    pub fn is_now(&self) -> bool {
        matches!(self, Fire::Now)
    }
}

#[derive(Debug)]
struct Pending {
    deadline: Instant,
    done: oneshot::Sender<Result<(), Cancelled>>,
}

#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    leading: bool,
    trailing: bool,
    reject_on_cancel: bool,
    last_exec: Option<Instant>,
    pending: Option<Pending>,
}

impl Throttle {
    /// A throttle firing on both edges that resolves superseded calls.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            leading: true,
            trailing: true,
            reject_on_cancel: false,
            last_exec: None,
            pending: None,
        }
    }

    pub fn leading(mut self, leading: bool) -> Self {
        self.leading = leading;
        self
    }

    pub fn trailing(mut self, trailing: bool) -> Self {
        self.trailing = trailing;
        self
    }

    /// Superseded calls receive `Err(Cancelled)` instead of `Ok(())`.
    pub fn reject_on_cancel(mut self, reject: bool) -> Self {
        self.reject_on_cancel = reject;
        self
    }

    /// Register a call at `now`.
    ///
    /// Any call already parked is superseded first.
    pub fn trigger(&mut self, now: Instant) -> Fire {
        self.cancel_pending();

        let idle = self
            .last_exec
            .is_none_or(|last| now.saturating_duration_since(last) > self.window);

        if self.window.is_zero() || (self.leading && idle) {
            self.last_exec = Some(now);
            return Fire::Now;
        }

        if !self.trailing {
            return Fire::Dropped;
        }

        let deadline = match self.last_exec {
            Some(last) => (last + self.window).max(now),
            None => now + self.window,
        };
        let (done, completion) = oneshot::channel();
        self.pending = Some(Pending { deadline, done });
        Fire::Deferred(completion)
    }

    /// When the parked call is due, if there is one.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the parked call if it is due at `now`.
    ///
    /// Returns `true` when the caller should run the action.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match &self.pending {
            Some(pending) if pending.deadline <= now => {}
            _ => return false,
        }
        if let Some(pending) = self.pending.take() {
            self.last_exec = Some(now);
            let _ = pending.done.send(Ok(()));
        }
        true
    }

    /// Take the parked call regardless of its deadline.
    pub fn flush(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.last_exec = Some(now);
                let _ = pending.done.send(Ok(()));
                true
            }
            None => false,
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            let outcome = if self.reject_on_cancel {
                Err(Cancelled)
            } else {
                Ok(())
            };
            let _ = pending.done.send(outcome);
        }
    }
}
