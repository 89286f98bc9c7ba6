//! The one mapping from elapsed time to on-screen state.
//!
//! Live playback applies the returned [`VisualState`] to its stage; the export renderer paints
//! it. Neither re-derives phase math on its own.

use crate::foundation::math::lerp;
use crate::timeline::ease::Ease;
use crate::timeline::model::{Phase, Timeline};

/// Upward travel of the title over the fade, pixels.
pub const TITLE_FADE_LIFT_PX: f64 = 50.0;
/// Title scale at the end of the fade.
pub const TITLE_FADE_END_SCALE: f64 = 0.9;
/// Easing applied to title lift and scale. Opacity is always linear.
pub const TITLE_FADE_EASE: Ease = Ease::InOutQuad;

/// Visual state at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    /// Clamped elapsed seconds.
    pub elapsed: f64,
    /// Active phase.
    pub phase: Phase,
    /// Title opacity in `[0, 1]`.
    pub title_opacity: f64,
    /// Title vertical offset from its resting position, pixels (negative is up).
    pub title_offset_y: f64,
    /// Title scale about its center.
    pub title_scale: f64,
    /// Top of the body block relative to the top of the frame, pixels.
    pub body_offset_y: f64,
}

impl VisualState {
    /// Whether the title needs painting.
    pub fn title_visible(&self) -> bool {
        self.title_opacity > 0.0
    }

    /// Whether the body has started scrolling.
    pub fn body_scrolling(&self) -> bool {
        matches!(self.phase, Phase::Scroll | Phase::Credits)
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.phase == other.phase
            && (self.title_opacity - other.title_opacity).abs() <= eps
            && (self.title_offset_y - other.title_offset_y).abs() <= eps
            && (self.title_scale - other.title_scale).abs() <= eps
            && (self.body_offset_y - other.body_offset_y).abs() <= eps
    }
}

/// Compute the visual state at `elapsed` seconds. Out-of-range times clamp to the timeline.
pub fn visual_state_at(elapsed: f64, timeline: &Timeline) -> VisualState {
    let t = timeline.clamp(elapsed);
    let phase = timeline.phase_at(t);

    let (title_opacity, title_offset_y, title_scale) = match phase {
        Phase::TitleHold => (1.0, 0.0, 1.0),
        Phase::TitleFade => {
            let span = timeline.title_fade_end - timeline.title_phase_end;
            let p = ((t - timeline.title_phase_end) / span).clamp(0.0, 1.0);
            let eased = TITLE_FADE_EASE.apply(p);
            (
                1.0 - p,
                -TITLE_FADE_LIFT_PX * eased,
                lerp(1.0, TITLE_FADE_END_SCALE, eased),
            )
        }
        Phase::Scroll | Phase::Credits => (0.0, -TITLE_FADE_LIFT_PX, TITLE_FADE_END_SCALE),
    };

    let body_offset_y = if t < timeline.title_fade_end {
        timeline.container_height
    } else {
        timeline.container_height - (t - timeline.title_fade_end) * timeline.scroll_rate
    };

    VisualState {
        elapsed: t,
        phase,
        title_opacity,
        title_offset_y,
        title_scale,
        body_offset_y,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/visual.rs"]
mod tests;
