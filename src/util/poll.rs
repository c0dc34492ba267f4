//! Managed poll timers.
//!
//! A [`PollSlot`] names one logical poll stream (messages, unread count).
//! Starting a stream hands out a fresh [`PollToken`] and invalidates every
//! earlier one; a spawned loop keeps ticking only while its token is current,
//! so restarting a stream replaces the previous loop instead of stacking a
//! second one. Each loop awaits its tick before sleeping again, which keeps a
//! stream single-flight.

#[cfg(test)]
#[path = "poll_test.rs"]
mod poll_test;

use std::future::Future;
use std::time::Duration;

/// Generation marker handed to the loop of one poll stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollToken(u64);

/// Bookkeeping for one poll stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PollSlot {
    generation: u64,
    active: bool,
}

impl PollSlot {
    /// Start (or restart) the stream, invalidating any running loop.
    pub fn start(&mut self) -> PollToken {
        self.generation += 1;
        self.active = true;
        PollToken(self.generation)
    }

    /// Cancel the stream. Idempotent.
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.generation += 1;
        }
    }

    /// Whether a loop holding `token` should keep ticking.
    #[must_use]
    pub fn is_current(&self, token: PollToken) -> bool {
        self.active && self.generation == token.0
    }

    /// Token of the running loop, if the stream is active.
    #[must_use]
    pub fn current(&self) -> Option<PollToken> {
        self.active.then_some(PollToken(self.generation))
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Spawn a loop that sleeps `interval`, then runs `tick` while `is_current`
/// still holds. The first tick happens after one interval.
///
/// Native builds have no timer source; the loop is not spawned.
#[cfg_attr(not(feature = "csr"), allow(unused_variables))]
pub fn spawn_poll<C, F, Fut>(interval: Duration, is_current: C, tick: F)
where
    C: Fn() -> bool + 'static,
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            loop {
                gloo_timers::future::sleep(interval).await;
                if !is_current() {
                    break;
                }
                tick().await;
            }
        });
    }
}
