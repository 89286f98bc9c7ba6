//! Live animation driver: wall-clock playback of a [`Timeline`].
//!
//! `stopped -> playing -> stopped`. Pause keeps `elapsed`; reset zeroes it. While playing,
//! each tick samples the clock, maps elapsed time through [`visual_state_at`] and hands the
//! result to a [`Stage`]. Reaching the end stops scheduling.

use crate::playback::clock::Clock;
use crate::playback::scheduler::{TickId, TickScheduler};
use crate::timeline::model::{Timeline, format_clock};
use crate::timeline::visual::{VisualState, visual_state_at};

/// On-screen elements the driver animates.
pub trait Stage {
    /// Apply title opacity/transform and body offset.
    fn apply(&mut self, state: &VisualState);
}

/// Snapshot of playback state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackState {
    /// Whether ticks are being scheduled.
    pub is_playing: bool,
    /// Seconds into the timeline, in `[0, total_duration]`.
    pub elapsed: f64,
}

/// Real-time driver over an injected clock and tick scheduler.
pub struct LiveDriver<C: Clock, S: TickScheduler> {
    clock: C,
    scheduler: S,
    timeline: Option<Timeline>,
    playing: bool,
    elapsed: f64,
    /// Clock reading at which `elapsed` would be zero.
    reference: f64,
    pending: Option<TickId>,
}

impl<C: Clock, S: TickScheduler> LiveDriver<C, S> {
    /// Stopped driver with no timeline yet.
    pub fn new(clock: C, scheduler: S) -> Self {
        Self {
            clock,
            scheduler,
            timeline: None,
            playing: false,
            elapsed: 0.0,
            reference: 0.0,
            pending: None,
        }
    }

    /// Current timeline, if one is set.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Access the scheduler, e.g. for a host loop that waits on it.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Tick the host should deliver next, if any.
    pub fn pending_tick(&self) -> Option<TickId> {
        self.pending
    }

    /// Replace the timeline after a content, speed or viewport change.
    ///
    /// Elapsed time is kept (clamped to the new duration); a playing driver continues from the
    /// same point. Clearing the timeline stops playback.
    pub fn set_timeline(&mut self, timeline: Option<Timeline>) {
        if self.playing {
            self.elapsed = (self.clock.now_secs() - self.reference).max(0.0);
        }
        self.timeline = timeline;
        match self.timeline.as_ref() {
            Some(t) => {
                self.elapsed = t.clamp(self.elapsed);
                if self.playing {
                    self.reference = self.clock.now_secs() - self.elapsed;
                }
            }
            None => {
                self.cancel_pending();
                self.playing = false;
                self.elapsed = 0.0;
            }
        }
    }

    /// Whether play is currently possible (a timeline exists).
    pub fn can_play(&self) -> bool {
        self.timeline.is_some()
    }

    /// Start or resume playback. Returns `false`, changing nothing, when no timeline is set.
    ///
    /// Resuming continues from the preserved `elapsed`; playing from the very end restarts.
    pub fn play(&mut self) -> bool {
        let Some(timeline) = self.timeline.as_ref() else {
            return false;
        };
        if self.playing {
            return true;
        }
        if self.elapsed >= timeline.total_duration {
            self.elapsed = 0.0;
        }
        self.reference = self.clock.now_secs() - self.elapsed;
        self.playing = true;
        self.pending = Some(self.scheduler.request_tick());
        tracing::debug!(elapsed = self.elapsed, "playback started");
        true
    }

    /// Stop ticking and keep `elapsed` where it is.
    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        let now = self.clock.now_secs();
        self.elapsed = match self.timeline.as_ref() {
            Some(t) => t.clamp(now - self.reference),
            None => 0.0,
        };
        self.playing = false;
        self.cancel_pending();
        tracing::debug!(elapsed = self.elapsed, "playback paused");
    }

    /// Play when stopped, pause when playing. Returns whether the driver is now playing.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    /// Stop, zero `elapsed` and put the stage back at the start.
    pub fn reset(&mut self, stage: &mut dyn Stage) {
        self.cancel_pending();
        self.playing = false;
        self.elapsed = 0.0;
        if let Some(t) = self.timeline.as_ref() {
            stage.apply(&visual_state_at(0.0, t));
        }
    }

    /// Deliver a due tick.
    ///
    /// Ticks that were cancelled or superseded are ignored and return `None` without touching
    /// state.
    pub fn tick(&mut self, id: TickId, stage: &mut dyn Stage) -> Option<VisualState> {
        if self.pending != Some(id) || !self.playing {
            return None;
        }
        self.pending = None;
        let timeline = self.timeline?;

        let elapsed = (self.clock.now_secs() - self.reference).max(0.0);
        if elapsed >= timeline.total_duration {
            self.playing = false;
            self.elapsed = timeline.total_duration;
            let state = visual_state_at(self.elapsed, &timeline);
            stage.apply(&state);
            tracing::debug!("playback reached the end");
            return Some(state);
        }

        self.elapsed = elapsed;
        let state = visual_state_at(elapsed, &timeline);
        stage.apply(&state);
        self.pending = Some(self.scheduler.request_tick());
        Some(state)
    }

    /// Tear down: cancel any pending tick and stop.
    pub fn close(&mut self) {
        self.cancel_pending();
        self.playing = false;
    }

    /// Playing flag and elapsed seconds.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            is_playing: self.playing,
            elapsed: self.elapsed,
        }
    }

    /// Visual state at the current `elapsed`.
    pub fn visual_state(&self) -> Option<VisualState> {
        self.timeline.as_ref().map(|t| visual_state_at(self.elapsed, t))
    }

    /// Progress in `[0, 1]` for a progress bar.
    pub fn progress(&self) -> f64 {
        self.timeline
            .as_ref()
            .map(|t| t.progress(self.elapsed))
            .unwrap_or(0.0)
    }

    /// `elapsed / duration` label, e.g. `0:12 / 1:18`.
    pub fn clock_label(&self) -> String {
        let total = self
            .timeline
            .as_ref()
            .map(|t| t.display_duration_secs() as f64)
            .unwrap_or(0.0);
        format!("{} / {}", format_clock(self.elapsed), format_clock(total))
    }

    fn cancel_pending(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_tick(id);
        }
    }
}

impl<C: Clock, S: TickScheduler> Drop for LiveDriver<C, S> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
