/// Host simulation collaborators
///
/// The controller never reaches into the simulation. The host hands it these
/// narrow read accessors once a player subject exists.

/// Camera context polled once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewContext {
    /// The simulation's own exterior camera audio is active
    pub exterior_audio_active: bool,

    /// The observer sits in the cockpit
    pub is_interior_view: bool,
}

impl ViewContext {
    /// First-person cockpit view
    pub fn interior() -> Self {
        Self {
            exterior_audio_active: false,
            is_interior_view: true,
        }
    }

    /// External camera with the simulation's exterior audio playing
    pub fn exterior_with_audio() -> Self {
        Self {
            exterior_audio_active: true,
            is_interior_view: false,
        }
    }

    /// Cockpit cues must not leak into exterior camera audio
    pub fn is_muted(&self) -> bool {
        self.exterior_audio_active && !self.is_interior_view
    }
}

/// Named output route, e.g. the simulation's interior mixer group
#[derive(Debug, Clone, PartialEq)]
pub struct OutputBus {
    name: String,
    gain: f32,
}

impl OutputBus {
    /// Create a bus; gain is clamped to 0.0-1.0
    pub fn new(name: impl Into<String>, gain: f32) -> Self {
        Self {
            name: name.into(),
            gain: gain.clamp(0.0, 1.0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

/// Per-frame G-load of the attached subject
pub trait GLoadSource {
    fn current_value(&self) -> f32;
}

/// Camera/view-mode provider
pub trait ViewContextSource {
    fn current(&self) -> ViewContext;
}

/// Mixer provider; `None` keeps both channels on the default output
pub trait MixerBusSource {
    fn interior_bus(&self) -> Option<OutputBus>;
}

/// Fixed load, handy for hosts that push values instead of exposing them
impl GLoadSource for f32 {
    fn current_value(&self) -> f32 {
        *self
    }
}

impl ViewContextSource for ViewContext {
    fn current(&self) -> ViewContext {
        *self
    }
}

impl MixerBusSource for Option<OutputBus> {
    fn interior_bus(&self) -> Option<OutputBus> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_only_for_exterior_with_audio() {
        assert!(ViewContext::exterior_with_audio().is_muted());
        assert!(!ViewContext::interior().is_muted());

        // Exterior camera without its own audio keeps the cockpit cue
        let silent_exterior = ViewContext {
            exterior_audio_active: false,
            is_interior_view: false,
        };
        assert!(!silent_exterior.is_muted());

        let interior_with_audio = ViewContext {
            exterior_audio_active: true,
            is_interior_view: true,
        };
        assert!(!interior_with_audio.is_muted());
    }

    #[test]
    fn test_output_bus_gain_clamped() {
        assert_eq!(OutputBus::new("Interior", 1.5).gain(), 1.0);
        assert_eq!(OutputBus::new("Interior", -1.0).gain(), 0.0);
        assert_eq!(OutputBus::new("Interior", 0.7).name(), "Interior");
    }

    #[test]
    fn test_plain_values_as_sources() {
        assert_eq!(6.5f32.current_value(), 6.5);
        assert!(ViewContext::exterior_with_audio().current().is_muted());
        assert!(None::<OutputBus>.interior_bus().is_none());
    }
}
