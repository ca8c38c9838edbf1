//! Volume with a transient mute override
//!
//! The stored level is what the slider shows; muting only changes what is
//! applied to the media resource, so un-muting restores the exact level,
//! including 0.

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Stored level (0.0-1.0)
    level: f64,

    /// Mute state (preserves level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller, clamping `level` to [0, 1]
    pub fn new(level: f64) -> Self {
        Self {
            level: Self::clamp(level),
            muted: false,
        }
    }

    /// Set stored level, clamped to [0, 1]
    ///
    /// Returns the stored value.
    pub fn set_level(&mut self, level: f64) -> f64 {
        self.level = Self::clamp(level);
        self.level
    }

    /// Stored level (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Mute (preserves level)
    pub fn mute(&mut self) {
        self.muted = true;
    }

    /// Unmute (restores stored level)
    pub fn unmute(&mut self) {
        self.muted = false;
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Level to apply to the media resource
    ///
    /// Returns 0.0 if muted, otherwise the stored level
    pub fn gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn clamp(level: f64) -> f64 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
