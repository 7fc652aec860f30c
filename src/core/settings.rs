//=========================================================================
// Starfield Settings
//
// Tunable constants of the effect. Defaults reproduce the classic look:
// 800 stars drifting one depth unit per frame, a 20% dark overlay for
// trails, and a glow on stars rendered wider than 1.5 px.
//
// Depth only stays within (0, far bound] while the step is a positive
// finite number; `validate` is checked wherever an animator is built.
//
//=========================================================================

//=== External Crates =====================================================
use serde::{Deserialize, Serialize};

//=== Internal Imports ====================================================
use crate::render::{Palette, Rgb, Rgba};

//=== InvalidSetting ======================================================

/// A setting the animator cannot run with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{field}` {reason}")]
pub struct InvalidSetting {
    /// Field name within [`StarfieldSettings`].
    pub field: &'static str,
    /// What the value must satisfy.
    pub reason: &'static str,
}

//=== StarfieldSettings ===================================================

/// Parameters of a [`StarfieldAnimator`](super::StarfieldAnimator).
///
/// Missing fields fall back to [`Default`] when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldSettings {
    /// Number of stars kept alive at all times.
    pub star_count: usize,

    /// Base speed; multiplied by `speed_scale` to get the depth step.
    pub speed: f32,

    /// Depth units travelled per unit of `speed` each frame.
    pub speed_scale: f32,

    /// Apparent size (px) above which a star glows.
    pub glow_threshold: f32,

    /// Glow blur radius in pixels.
    pub glow_blur: f32,

    /// Overlay color painted each frame.
    pub trail_color: Rgb,

    /// Overlay opacity. Lower values leave longer trails.
    pub trail_alpha: f32,

    /// Colors stars are tinted from.
    pub palette: Palette,

    /// Fixed RNG seed for reproducible fields; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl StarfieldSettings {
    /// Depth a star travels per frame.
    pub fn depth_step(&self) -> f32 {
        self.speed * self.speed_scale
    }

    /// Fill style of the per-frame trail overlay.
    pub fn trail(&self) -> Rgba {
        self.trail_color.with_alpha(self.trail_alpha)
    }

    /// Checks the numeric settings.
    ///
    /// `star_count` is not checked here: an empty field is a valid, if
    /// dull, animation.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), InvalidSetting> {
        let invalid = |field, reason| Err(InvalidSetting { field, reason });
        let positive = |value: f32| value.is_finite() && value > 0.0;
        let non_negative = |value: f32| value.is_finite() && value >= 0.0;

        if !positive(self.speed) {
            return invalid("speed", "must be a positive number");
        }
        if !positive(self.speed_scale) {
            return invalid("speed_scale", "must be a positive number");
        }
        if !positive(self.depth_step()) {
            return invalid("speed", "times speed_scale must be a positive number");
        }
        if !non_negative(self.glow_threshold) {
            return invalid("glow_threshold", "must be zero or positive");
        }
        if !non_negative(self.glow_blur) {
            return invalid("glow_blur", "must be zero or positive");
        }
        if !(0.0..=1.0).contains(&self.trail_alpha) {
            return invalid("trail_alpha", "must be within [0, 1]");
        }
        Ok(())
    }
}

impl Default for StarfieldSettings {
    fn default() -> Self {
        Self {
            star_count: 800,
            speed: 0.05,
            speed_scale: 20.0,
            glow_threshold: 1.5,
            glow_blur: 10.0,
            trail_color: Rgb::new(5, 5, 5),
            trail_alpha: 0.2,
            palette: Palette::default(),
            seed: None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
