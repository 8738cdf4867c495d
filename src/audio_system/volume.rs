/// Load-to-volume shaping
///
/// Maps G-load onto a 0.0-1.0 volume with a quadratic curve so light loads
/// stay near-silent and the fade-in steepens towards the nominal maximum.

/// Nominal G-load at which the breathing channel reaches full volume
pub const DEFAULT_MAX_LOAD: f32 = 10.0;

/// Quadratic volume curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeCurve {
    /// Load mapped to volume 1.0
    max_load: f32,
}

impl VolumeCurve {
    /// Create a curve reaching full volume at `max_load`.
    ///
    /// Non-finite or non-positive values fall back to [`DEFAULT_MAX_LOAD`].
    pub fn new(max_load: f32) -> Self {
        let max_load = if max_load.is_finite() && max_load > 0.0 {
            max_load
        } else {
            DEFAULT_MAX_LOAD
        };
        Self { max_load }
    }

    /// Get the load mapped to full volume
    pub fn max_load(&self) -> f32 {
        self.max_load
    }

    /// `clamp(load / max_load, 0, 1)^2`, with NaN treated as silence
    pub fn volume(&self, load: f32) -> f32 {
        if load.is_nan() {
            return 0.0;
        }
        let normalized = (load / self.max_load).clamp(0.0, 1.0);
        normalized * normalized
    }
}

impl Default for VolumeCurve {
    fn default() -> Self {
        Self {
            max_load: DEFAULT_MAX_LOAD,
        }
    }
}
