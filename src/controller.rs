/// Breathing controller
///
/// Maps the attached subject's G-load onto the two audio channels once per
/// host tick. The host drives it through explicit lifecycle calls:
///
/// ```text
/// new ──► start_loading ──► on_subject_attached ──► on_tick* ──► on_teardown
///                                  ▲                   │
///                                  └─ on_subject_detached
/// ```
///
/// Transition rule, evaluated every tick in order:
/// 1. load > threshold and breathing stopped: interrupt ending, start breathing
/// 2. load <= threshold and breathing playing: stop breathing, trigger ending
///
/// Ending is never retriggered while it is still playing. After the
/// transition, volumes are set: both 0 for an exterior camera with its own
/// audio, otherwise `curve(load) * attenuation` for breathing and
/// `attenuation` for ending.

use crate::audio_system::{
    AudioBackend, AudioChannel, ChannelKind, ClipData, ClipLoader, ClipPaths, VolumeCurve,
};
use crate::config::{Config, DEFAULT_ACTIVATION_THRESHOLD, DEFAULT_ATTENUATION};
use crate::error::CollaboratorError;
use crate::host::{GLoadSource, MixerBusSource, ViewContext, ViewContextSource};
use crate::state::ControllerState;

/// Tuning of the transition and volume rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    /// Breathing starts strictly above this load and stops at or below it
    pub activation_threshold: f32,

    /// Fixed level applied to both channels
    pub attenuation: f32,

    /// Load-to-volume shaping for the breathing channel
    pub curve: VolumeCurve,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            activation_threshold: DEFAULT_ACTIVATION_THRESHOLD,
            attenuation: DEFAULT_ATTENUATION,
            curve: VolumeCurve::default(),
        }
    }
}

impl From<&Config> for ControllerSettings {
    fn from(config: &Config) -> Self {
        Self {
            activation_threshold: config.activation_threshold,
            attenuation: config.attenuation.clamp(0.0, 1.0),
            curve: VolumeCurve::new(config.max_load),
        }
    }
}

pub struct BreathingController {
    settings: ControllerSettings,
    breathing: AudioChannel,
    ending: AudioChannel,
    backend: Box<dyn AudioBackend>,
    loader: Option<ClipLoader>,
    load_source: Option<Box<dyn GLoadSource>>,
    view_source: Option<Box<dyn ViewContextSource>>,
    last_state: ControllerState,
}

impl BreathingController {
    /// Create a controller with both channels unset
    pub fn new(settings: ControllerSettings, backend: Box<dyn AudioBackend>) -> Self {
        tracing::info!(
            "Breathing controller created (threshold={}G, attenuation={}, max_load={}G)",
            settings.activation_threshold,
            settings.attenuation,
            settings.curve.max_load()
        );

        Self {
            settings,
            breathing: AudioChannel::new(ChannelKind::Breathing),
            ending: AudioChannel::new(ChannelKind::Ending),
            backend,
            loader: Some(ClipLoader::new()),
            load_source: None,
            view_source: None,
            last_state: ControllerState::Idle,
        }
    }

    /// Kick off background loads for both clips
    pub fn start_loading(&mut self, paths: &ClipPaths) {
        let Some(loader) = &self.loader else {
            tracing::warn!("Ignoring clip load request after teardown");
            return;
        };
        for kind in [ChannelKind::Breathing, ChannelKind::Ending] {
            loader.spawn(kind, paths.get(kind).to_path_buf());
        }
    }

    /// Build a sink from loaded clip data and install it.
    /// On failure the channel keeps its previous state.
    pub fn publish_clip(&mut self, kind: ChannelKind, clip: ClipData) {
        if self.loader.is_none() {
            tracing::debug!("Ignoring {} clip published after teardown", kind);
            return;
        }

        match self.backend.create_sink(kind, &clip) {
            Ok(sink) => {
                self.channel_mut(kind).install(sink);
                tracing::info!("Audio clip loaded successfully: {}", clip.path().display());
            }
            Err(e) => {
                tracing::error!("Error preparing {} clip {}: {}", kind, clip.path().display(), e);
            }
        }
    }

    /// Publish every load that completed since the last call
    pub fn poll_loads(&mut self) {
        let outcomes: Vec<_> = match &self.loader {
            Some(loader) => loader.completed().collect(),
            None => return,
        };

        for outcome in outcomes {
            match outcome.result {
                Ok(clip) => self.publish_clip(outcome.kind, clip),
                Err(e) => tracing::error!("Error loading {} audio: {}", outcome.kind, e),
            }
        }
    }

    /// Wire in a freshly spawned player subject
    pub fn on_subject_attached(
        &mut self,
        load_source: Box<dyn GLoadSource>,
        view_source: Box<dyn ViewContextSource>,
        mixer: &dyn MixerBusSource,
    ) {
        if self.loader.is_none() {
            tracing::warn!("Ignoring subject attach after teardown");
            return;
        }

        self.load_source = Some(load_source);
        self.view_source = Some(view_source);
        tracing::info!("G-load source attached");

        self.set_mixer_bus(mixer);
    }

    /// Route both channels through the host's interior bus, if it has one
    pub fn set_mixer_bus(&mut self, mixer: &dyn MixerBusSource) {
        match mixer.interior_bus() {
            Some(bus) => {
                tracing::info!("Mixer group set to {}", bus.name());
                self.breathing.set_output_bus(bus.clone());
                self.ending.set_output_bus(bus);
            }
            None => tracing::error!("{}", CollaboratorError::MissingMixerBus),
        }
    }

    /// The subject went away; silence both channels until the next attach
    pub fn on_subject_detached(&mut self) {
        self.load_source = None;
        self.view_source = None;
        self.breathing.stop();
        self.ending.stop();
        self.note_state();
        tracing::info!("G-load source detached");
    }

    /// Per-frame update. A no-op for playback until a subject is attached.
    pub fn on_tick(&mut self) {
        self.poll_loads();

        let Some(load_source) = &self.load_source else {
            tracing::trace!("Tick skipped: {}", CollaboratorError::NoLoadSource);
            return;
        };
        let load = load_source.current_value();
        let view = self
            .view_source
            .as_ref()
            .map(|source| source.current())
            .unwrap_or_default();

        self.apply(load, view);
    }

    /// Run the transition rule and then the volume rule for one tick
    pub fn apply(&mut self, load: f32, view: ViewContext) {
        let threshold = self.settings.activation_threshold;

        // NaN satisfies neither comparison, so the current state is held
        if load > threshold && !self.breathing.is_playing() {
            self.start_breathing();
        } else if load <= threshold && self.breathing.is_playing() {
            self.stop_breathing();
        }

        if view.is_muted() {
            self.breathing.set_volume(0.0);
            self.ending.set_volume(0.0);
        } else {
            let attenuation = self.settings.attenuation;
            self.breathing
                .set_volume(self.settings.curve.volume(load) * attenuation);
            self.ending.set_volume(attenuation);
        }

        self.note_state();
    }

    /// Stop and release both channels and drop every collaborator.
    /// Loads still in flight are discarded when they complete.
    pub fn on_teardown(&mut self) {
        tracing::info!("Unloading breathing controller");
        self.breathing.release();
        self.ending.release();
        self.loader = None;
        self.load_source = None;
        self.view_source = None;
        self.last_state = ControllerState::Idle;
    }

    pub fn state(&self) -> ControllerState {
        ControllerState::from_channels(&self.breathing, &self.ending)
    }

    pub fn breathing(&self) -> &AudioChannel {
        &self.breathing
    }

    pub fn ending(&self) -> &AudioChannel {
        &self.ending
    }

    /// Threshold, attenuation and curve in effect
    pub fn settings(&self) -> &ControllerSettings {
        &self.settings
    }

    pub fn is_attached(&self) -> bool {
        self.load_source.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.loader.is_none()
    }

    fn channel_mut(&mut self, kind: ChannelKind) -> &mut AudioChannel {
        match kind {
            ChannelKind::Breathing => &mut self.breathing,
            ChannelKind::Ending => &mut self.ending,
        }
    }

    fn start_breathing(&mut self) {
        if !self.breathing.is_ready() {
            return;
        }
        tracing::info!("Playing breathing sound");
        if self.ending.is_playing() {
            self.ending.stop();
        }
        self.breathing.play();
    }

    fn stop_breathing(&mut self) {
        tracing::debug!("Stopping breathing sound");
        self.breathing.stop();
        self.trigger_ending();
    }

    fn trigger_ending(&mut self) {
        if self.ending.is_playing() {
            return;
        }
        self.ending.set_volume(self.settings.attenuation);
        self.ending.play();
    }

    fn note_state(&mut self) {
        let state = self.state();
        if state != self.last_state {
            tracing::debug!(
                "Controller state {} -> {}",
                self.last_state.description(),
                state.description()
            );
            self.last_state = state;
        }
    }
}
