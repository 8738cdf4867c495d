//! G-load driven breathing audio.
//!
//! A per-frame controller that plays a looped breathing clip while the
//! pilot pulls more than the activation threshold, and hands off to a
//! one-shot recovery clip once the load drops back.

pub mod audio_system;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod logging;
pub mod state;

pub use audio_system::{
    AudioBackend, AudioChannel, ChannelKind, ClipData, ClipPaths, PlaybackSink, RodioBackend,
    VolumeCurve,
};
pub use config::{Config, DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_ATTENUATION};
pub use controller::{BreathingController, ControllerSettings};
pub use error::{AudioError, CollaboratorError, ConfigError};
pub use host::{GLoadSource, MixerBusSource, OutputBus, ViewContext, ViewContextSource};
pub use state::ControllerState;
