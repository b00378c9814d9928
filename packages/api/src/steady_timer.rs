//! Steady timer with the legacy relative-expiry accessors

use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use chrono::TimeDelta;
use mplex_io::timer::signed_between;

use crate::IoService;

/// `mplex_io::SteadyTimer` plus `expires_from_now`.
///
/// Every other operation is reached through `Deref` and behaves exactly as
/// on the wrapped timer.
#[derive(Debug)]
pub struct SteadyTimer {
    inner: mplex_io::SteadyTimer,
}

impl SteadyTimer {
    #[must_use]
    pub fn new(io: &IoService) -> Self {
        Self {
            inner: mplex_io::SteadyTimer::new(io.as_context()),
        }
    }

    #[must_use]
    pub fn with_expiry_after(io: &IoService, duration: Duration) -> Self {
        Self {
            inner: mplex_io::SteadyTimer::with_expiry_after(io.as_context(), duration),
        }
    }

    /// Time left until the expiry; negative once it has passed.
    ///
    /// Reads the clock but never touches the expiry.
    #[must_use]
    pub fn expires_from_now(&self) -> TimeDelta {
        signed_between(self.inner.expiry(), Instant::now())
    }

    /// Old setter overload: expire `duration` from now. Pending waits are
    /// aborted; returns how many.
    pub fn set_expires_from_now(&mut self, duration: Duration) -> usize {
        self.inner.expires_after(duration)
    }
}

impl Deref for SteadyTimer {
    type Target = mplex_io::SteadyTimer;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SteadyTimer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
