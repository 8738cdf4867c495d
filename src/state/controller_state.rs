/// Controller state
///
/// The controller keeps no state variable of its own; this view is derived
/// from the channels' playing status every time it is asked for.

use crate::audio_system::AudioChannel;

/// What the controller is currently sounding
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ControllerState {
    /// Nothing playing
    #[default]
    Idle,

    /// Breathing loop active
    Breathing,

    /// Recovery clip finishing
    Ending,
}

impl ControllerState {
    /// Derive the state from both channels
    pub fn from_channels(breathing: &AudioChannel, ending: &AudioChannel) -> Self {
        if breathing.is_playing() {
            ControllerState::Breathing
        } else if ending.is_playing() {
            ControllerState::Ending
        } else {
            ControllerState::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ControllerState::Idle)
    }

    pub fn is_breathing(&self) -> bool {
        matches!(self, ControllerState::Breathing)
    }

    /// Get a human-readable description of the state
    pub fn description(&self) -> &'static str {
        match self {
            ControllerState::Idle => "Idle",
            ControllerState::Breathing => "Breathing",
            ControllerState::Ending => "Ending",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio_system::ChannelKind;

    #[test]
    fn test_unset_channels_are_idle() {
        let breathing = AudioChannel::new(ChannelKind::Breathing);
        let ending = AudioChannel::new(ChannelKind::Ending);
        let state = ControllerState::from_channels(&breathing, &ending);
        assert!(state.is_idle());
        assert_eq!(state.description(), "Idle");
    }

    #[test]
    fn test_state_predicates() {
        assert!(ControllerState::Breathing.is_breathing());
        assert!(!ControllerState::Ending.is_breathing());
        assert!(!ControllerState::Ending.is_idle());
        assert_eq!(ControllerState::default(), ControllerState::Idle);
    }
}
