pub mod channel;
pub mod loader;
pub mod player;
/// Audio system module
///
/// Provides the two channels the breathing controller drives:
/// - A looped breathing channel whose volume follows G-load
/// - A one-shot ending channel played at a fixed level on recovery
/// - Background clip loading published into the channels on the tick thread
///
/// ## Architecture
///
/// ```text
/// BreathingController
///   ├── AudioChannel (Breathing) ─┐
///   └── AudioChannel (Ending)    ─┘ at most one audible
///
/// Each AudioChannel has:
///   └── Option<Box<dyn PlaybackSink>>  (unset until its clip is loaded)
///
/// ClipLoader thread ──LoadOutcome──► AudioBackend::create_sink ──► AudioChannel::install
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use audio_system::{AudioChannel, ChannelKind, RodioBackend, AudioBackend};
///
/// let backend = RodioBackend::try_default()?;
/// let clip = loader::read_clip(Path::new("Sounds/GBreath.ogg"))?;
///
/// let mut channel = AudioChannel::new(ChannelKind::Breathing);
/// channel.install(backend.create_sink(ChannelKind::Breathing, &clip)?);
/// channel.set_volume(0.5);
/// channel.play();
/// ```
pub mod source;
pub mod volume;

// Re-export commonly used types
pub use channel::AudioChannel;
pub use loader::{ClipData, ClipLoader, ClipPaths, LoadOutcome};
pub use player::{AudioBackend, PlaybackSink, RodioBackend, RodioSink};
pub use source::ChannelKind;
pub use volume::{VolumeCurve, DEFAULT_MAX_LOAD};
