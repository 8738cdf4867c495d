/// Audio channel kinds
///
/// The controller drives exactly two channels, one per clip.
use std::fmt;

/// Channel categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Labored breathing under sustained load (looped)
    Breathing,

    /// Recovery exhale once load drops back (one-shot)
    Ending,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelKind::Breathing => write!(f, "Breathing"),
            ChannelKind::Ending => write!(f, "Ending"),
        }
    }
}

impl ChannelKind {
    /// Whether playback of this channel repeats until stopped
    pub fn loops(&self) -> bool {
        match self {
            ChannelKind::Breathing => true,
            ChannelKind::Ending => false,
        }
    }

    /// Clip file name shipped with the mod
    pub fn default_file_name(&self) -> &'static str {
        match self {
            ChannelKind::Breathing => "GBreath.ogg",
            ChannelKind::Ending => "GBreath_End.ogg",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_kind_display() {
        assert_eq!(ChannelKind::Breathing.to_string(), "Breathing");
        assert_eq!(ChannelKind::Ending.to_string(), "Ending");
    }

    #[test]
    fn test_only_breathing_loops() {
        assert!(ChannelKind::Breathing.loops());
        assert!(!ChannelKind::Ending.loops());
    }

    #[test]
    fn test_default_file_names() {
        assert_eq!(ChannelKind::Breathing.default_file_name(), "GBreath.ogg");
        assert_eq!(ChannelKind::Ending.default_file_name(), "GBreath_End.ogg");
    }
}
