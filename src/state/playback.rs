//! Timed reveal of a visited-cell sequence.
//!
//! Exactly one timer is in flight at a time. Every schedule carries the
//! generation it was created under; installing a new sequence, skipping or
//! tearing down bumps the generation, so a tick that was already queued by the
//! host is recognised as stale and dropped.

use crate::config::MIN_SPEED_MS;

/// Schedules one-shot timers on behalf of the controller.
pub trait TimerHost {
    /// Replaces any pending timer. When it fires, the host must call
    /// `PlaybackController::tick(generation)`.
    fn schedule(&mut self, delay_ms: u32, generation: u64);
    /// Idempotent.
    fn cancel(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Playing,
    Completed,
    Skipped,
}

/// What consumers observe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
    pub cursor: usize,
    pub len: usize,
    pub phase: Phase,
}

impl PlaybackSnapshot {
    pub fn is_animating(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Path overlay is due once the reveal has finished, and only if there is a path.
    pub fn show_path(&self, path_len: usize) -> bool {
        path_len > 0 && matches!(self.phase, Phase::Completed | Phase::Skipped)
    }
}

pub struct PlaybackController<H: TimerHost> {
    host: H,
    cursor: usize,
    len: usize,
    phase: Phase,
    generation: u64,
    speed_ms: u32,
}

impl<H: TimerHost> PlaybackController<H> {
    pub fn new(host: H, speed_ms: u32) -> Self {
        Self {
            host,
            cursor: 0,
            len: 0,
            phase: Phase::Idle,
            generation: 0,
            speed_ms: speed_ms.max(MIN_SPEED_MS),
        }
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            cursor: self.cursor,
            len: self.len,
            phase: self.phase,
        }
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn host(&self) -> &H {
        &self.host
    }

    #[cfg(test)]
    pub(crate) fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Takes effect at the next scheduling decision; the interval in flight is kept.
    pub fn set_speed(&mut self, speed_ms: u32) {
        self.speed_ms = speed_ms.max(MIN_SPEED_MS);
    }

    fn invalidate(&mut self) {
        self.host.cancel();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Starts revealing a new sequence of `len` cells from the beginning.
    pub fn install(&mut self, len: usize) {
        self.invalidate();
        self.cursor = 0;
        self.len = len;
        if len == 0 {
            self.phase = Phase::Idle;
            tracing::debug!("playback idle: empty sequence");
            return;
        }
        self.phase = Phase::Playing;
        tracing::debug!(len, speed_ms = self.speed_ms, generation = self.generation, "playback started");
        self.host.schedule(self.speed_ms, self.generation);
    }

    /// Advances one cell. Returns false when the tick was stale and ignored.
    pub fn tick(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.phase != Phase::Playing {
            tracing::trace!(generation, current = self.generation, "stale tick dropped");
            return false;
        }
        self.cursor = (self.cursor + 1).min(self.len);
        if self.cursor >= self.len {
            self.phase = Phase::Completed;
            tracing::debug!(len = self.len, "playback completed");
            return true;
        }
        self.host.schedule(self.speed_ms, self.generation);
        true
    }

    /// Jumps to the end of a non-idle sequence. No-op when idle.
    pub fn skip(&mut self) {
        if self.phase == Phase::Idle {
            return;
        }
        self.invalidate();
        self.cursor = self.len;
        self.phase = Phase::Skipped;
        tracing::debug!(len = self.len, "playback skipped");
    }

    /// Cancels the pending timer; ticks scheduled before this are ignored.
    pub fn teardown(&mut self) {
        self.invalidate();
    }
}

impl<H: TimerHost> Drop for PlaybackController<H> {
    fn drop(&mut self) {
        self.host.cancel();
    }
}
