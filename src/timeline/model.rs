//! Timeline model: where each phase starts and ends for a given content height and speed.
//!
//! Phases, in order: title hold, title fade, scroll, credits. Phase math uses unrounded seconds;
//! only [`Timeline::display_duration_secs`] rounds.

use crate::config::profile::RenderProfile;
use crate::foundation::core::Fps;
use crate::foundation::error::{StoryError, StoryResult};
use crate::layout::content::ContentLayout;

/// Seconds the title is shown before fading.
pub const TITLE_HOLD_SECS: f64 = 6.0;
/// Seconds the title takes to fade out.
pub const TITLE_FADE_SECS: f64 = 3.0;
/// Seconds reserved after the scroll for the closing credit.
pub const CREDITS_RESERVE_SECS: f64 = 5.0;
/// Extra scroll distance so the first line starts below the frame and the closing mark fully
/// exits above it.
pub const SCROLL_BUFFER_PX: f64 = 500.0;

/// Height of the scrolling content block.
#[derive(Clone, Copy, Debug)]
pub enum ContentExtent<'a> {
    /// Height measured by the host, in pixels.
    Measured(f64),
    /// Height estimated from wrapped line counts and the spacing table.
    Layout(&'a ContentLayout),
}

impl ContentExtent<'_> {
    /// Content height in pixels.
    pub fn height_px(&self) -> f64 {
        match self {
            Self::Measured(h) => *h,
            Self::Layout(layout) => layout.height(),
        }
    }
}

/// Timeline phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Title fully visible.
    TitleHold,
    /// Title fading out, body parked below the frame.
    TitleFade,
    /// Body scrolling up.
    Scroll,
    /// Scroll distance consumed; closing credit reserve.
    Credits,
}

/// Derived timing for one (content, speed, container) combination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timeline {
    /// End of the title hold, seconds.
    pub title_phase_end: f64,
    /// End of the title fade and start of the scroll, seconds.
    pub title_fade_end: f64,
    /// End of the scroll phase, seconds.
    pub scroll_end: f64,
    /// Total duration, seconds (unrounded).
    pub total_duration: f64,
    /// Scroll rate, pixels per second.
    pub scroll_rate: f64,
    /// Height of the visible frame, pixels.
    pub container_height: f64,
    /// Height of the content block, pixels.
    pub content_height: f64,
}

/// Compute the phase boundaries for `extent` scrolled through a `container_height_px` frame.
#[tracing::instrument(level = "debug", skip(extent), fields(content_height = extent.height_px()))]
pub fn compute_timeline(
    extent: ContentExtent<'_>,
    profile: &RenderProfile,
    container_height_px: f64,
) -> StoryResult<Timeline> {
    let content_height = extent.height_px();
    if !content_height.is_finite() || content_height < 0.0 {
        return Err(StoryError::validation(
            "content height must be finite and >= 0",
        ));
    }
    if !container_height_px.is_finite() || container_height_px <= 0.0 {
        return Err(StoryError::validation(
            "container height must be finite and > 0",
        ));
    }
    let scroll_rate = profile.scroll_rate();

    let scroll_distance = content_height + container_height_px + SCROLL_BUFFER_PX;
    let scroll_duration = scroll_distance / scroll_rate;
    let title_phase_end = TITLE_HOLD_SECS;
    let title_fade_end = title_phase_end + TITLE_FADE_SECS;
    let scroll_end = title_fade_end + scroll_duration;

    Ok(Timeline {
        title_phase_end,
        title_fade_end,
        scroll_end,
        total_duration: scroll_end + CREDITS_RESERVE_SECS,
        scroll_rate,
        container_height: container_height_px,
        content_height,
    })
}

impl Timeline {
    /// Distance scrolled during the scroll phase, pixels.
    pub fn scroll_distance(&self) -> f64 {
        (self.scroll_end - self.title_fade_end) * self.scroll_rate
    }

    /// Duration shown to users: total rounded up to the next whole second.
    pub fn display_duration_secs(&self) -> u64 {
        self.total_duration.ceil() as u64
    }

    /// Clamp `elapsed` into `[0, total_duration]`. NaN maps to 0.
    pub fn clamp(&self, elapsed: f64) -> f64 {
        if elapsed.is_nan() {
            return 0.0;
        }
        elapsed.clamp(0.0, self.total_duration)
    }

    /// Phase active at `elapsed`.
    pub fn phase_at(&self, elapsed: f64) -> Phase {
        let t = self.clamp(elapsed);
        if t < self.title_phase_end {
            Phase::TitleHold
        } else if t < self.title_fade_end {
            Phase::TitleFade
        } else if t < self.scroll_end {
            Phase::Scroll
        } else {
            Phase::Credits
        }
    }

    /// Number of frames an export at `fps` renders: `ceil(total_duration * fps)`.
    pub fn frame_count(&self, fps: Fps) -> u64 {
        fps.frames_to_cover(self.total_duration)
    }

    /// Fraction of the timeline covered by `elapsed`, in `[0, 1]`.
    pub fn progress(&self, elapsed: f64) -> f64 {
        if self.total_duration <= 0.0 {
            return 0.0;
        }
        self.clamp(elapsed) / self.total_duration
    }
}

/// Format seconds as `m:ss`, flooring partial seconds.
pub fn format_clock(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
