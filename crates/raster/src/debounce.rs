//! Delay-and-coalesce scheduling for autosave
//!
//! Time is passed in explicitly so the engine stays synchronous; the driver
//! owns the real timer and only asks whether the deadline has passed.

use std::time::{Duration, Instant};

/// A single resettable deadline
///
/// Scheduling while a deadline is pending replaces it, so at most one fire is
/// outstanding. Each schedule gets a new generation number.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    generation: u64,
}

impl Debouncer {
    /// A zero delay fires on the first poll after scheduling
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            generation: 0,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// (Re)start the timer from `now`, returning the new deadline
    pub fn schedule(&mut self, now: Instant) -> Instant {
        let deadline = now + self.delay;
        self.deadline = Some(deadline);
        self.generation += 1;
        deadline
    }

    /// Drop the pending deadline; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Fire right away, pending or not, under a fresh generation
    pub fn fire_now(&mut self) -> u64 {
        self.deadline = None;
        self.generation += 1;
        self.generation
    }

    /// Fire if the deadline has passed
    ///
    /// Returns the generation that fired. A schedule fires at most once.
    pub fn take_due(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.generation)
            }
            _ => None,
        }
    }

    #[inline]
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
