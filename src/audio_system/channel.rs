/// Audio channel
///
/// Wraps an optional playback sink. Until a clip has been published every
/// operation is a silent no-op, but volume, loop flag and bus assignment are
/// remembered and applied the moment a sink is installed.

use super::player::PlaybackSink;
use super::source::ChannelKind;
use crate::host::OutputBus;

pub struct AudioChannel {
    kind: ChannelKind,
    sink: Option<Box<dyn PlaybackSink>>,
    looped: bool,
    volume: f32,
    bus: Option<OutputBus>,
}

impl AudioChannel {
    /// Create an unset channel with the kind's default loop flag
    pub fn new(kind: ChannelKind) -> Self {
        Self {
            kind,
            sink: None,
            looped: kind.loops(),
            volume: 1.0,
            bus: None,
        }
    }

    /// Whether a clip has been published into this channel
    pub fn is_ready(&self) -> bool {
        self.sink.is_some()
    }

    /// Publish a fully built sink, replacing any previous one
    pub fn install(&mut self, mut sink: Box<dyn PlaybackSink>) {
        sink.set_loop(self.looped);
        sink.set_volume(self.volume);
        if let Some(bus) = &self.bus {
            sink.set_output_bus(bus);
        }

        if let Some(mut previous) = self.sink.replace(sink) {
            previous.stop();
        }
        tracing::debug!("{} channel ready", self.kind);
    }

    /// Stop and drop the sink; the channel goes back to unset
    pub fn release(&mut self) {
        if let Some(mut sink) = self.sink.take() {
            sink.stop();
            tracing::debug!("Released {} channel", self.kind);
        }
    }

    /// Start playback. Failures are logged and the channel stays stopped.
    pub fn play(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(e) = sink.play() {
                tracing::error!("Failed to play {} channel: {}", self.kind, e);
            }
        }
    }

    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.stop();
        }
    }

    /// Check if audio is playing; an unset channel never plays
    pub fn is_playing(&self) -> bool {
        self.sink.as_ref().map(|s| s.is_playing()).unwrap_or(false)
    }

    /// Set volume (0.0-1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(sink) = self.sink.as_mut() {
            sink.set_volume(self.volume);
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_looped(&self) -> bool {
        self.looped
    }

    pub fn set_output_bus(&mut self, bus: OutputBus) {
        if let Some(sink) = self.sink.as_mut() {
            sink.set_output_bus(&bus);
        }
        self.bus = Some(bus);
    }

    /// Bus the channel routes through once a sink exists
    pub fn output_bus(&self) -> Option<&OutputBus> {
        self.bus.as_ref()
    }

    /// Audible means playing with a nonzero volume
    pub fn is_audible(&self) -> bool {
        self.is_playing() && self.volume > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AudioError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct SinkLog {
        playing: bool,
        volume: f32,
        looped: bool,
        bus: Option<String>,
        stops: usize,
    }

    struct RecordingSink(Rc<RefCell<SinkLog>>);

    impl PlaybackSink for RecordingSink {
        fn play(&mut self) -> Result<(), AudioError> {
            self.0.borrow_mut().playing = true;
            Ok(())
        }
        fn stop(&mut self) {
            let mut log = self.0.borrow_mut();
            log.playing = false;
            log.stops += 1;
        }
        fn set_volume(&mut self, volume: f32) {
            self.0.borrow_mut().volume = volume;
        }
        fn is_playing(&self) -> bool {
            self.0.borrow().playing
        }
        fn set_loop(&mut self, looped: bool) {
            self.0.borrow_mut().looped = looped;
        }
        fn set_output_bus(&mut self, bus: &OutputBus) {
            self.0.borrow_mut().bus = Some(bus.name().to_string());
        }
    }

    #[test]
    fn test_unset_channel_is_noop() {
        let mut channel = AudioChannel::new(ChannelKind::Breathing);
        channel.play();
        channel.stop();
        channel.set_volume(0.4);
        channel.release();

        assert!(!channel.is_ready());
        assert!(!channel.is_playing());
        assert!(!channel.is_audible());
        assert_eq!(channel.volume(), 0.4);
    }

    #[test]
    fn test_settings_applied_on_install() {
        let mut channel = AudioChannel::new(ChannelKind::Ending);
        channel.set_volume(0.5);
        channel.set_output_bus(OutputBus::new("Interior", 1.0));

        let log = Rc::new(RefCell::new(SinkLog::default()));
        channel.install(Box::new(RecordingSink(Rc::clone(&log))));

        let log = log.borrow();
        assert_eq!(log.volume, 0.5);
        assert!(!log.looped);
        assert_eq!(log.bus.as_deref(), Some("Interior"));
    }

    #[test]
    fn test_loop_flag_and_bus_are_remembered() {
        let mut breathing = AudioChannel::new(ChannelKind::Breathing);
        let ending = AudioChannel::new(ChannelKind::Ending);
        assert!(breathing.is_looped());
        assert!(!ending.is_looped());
        assert!(breathing.output_bus().is_none());

        breathing.set_output_bus(OutputBus::new("Interior", 0.7));
        let log = Rc::new(RefCell::new(SinkLog::default()));
        breathing.install(Box::new(RecordingSink(Rc::clone(&log))));

        assert_eq!(breathing.output_bus().map(|b| b.name()), Some("Interior"));
        assert!(log.borrow().looped);
        assert_eq!(log.borrow().bus.as_deref(), Some("Interior"));
    }

    #[test]
    fn test_volume_clamped() {
        let mut channel = AudioChannel::new(ChannelKind::Breathing);
        channel.set_volume(3.0);
        assert_eq!(channel.volume(), 1.0);
        channel.set_volume(-1.0);
        assert_eq!(channel.volume(), 0.0);
    }

    #[test]
    fn test_release_stops_sink() {
        let mut channel = AudioChannel::new(ChannelKind::Breathing);
        let log = Rc::new(RefCell::new(SinkLog::default()));
        channel.install(Box::new(RecordingSink(Rc::clone(&log))));

        channel.play();
        assert!(channel.is_playing());

        channel.release();
        assert!(!channel.is_ready());
        assert!(!log.borrow().playing);
        assert_eq!(log.borrow().stops, 1);
    }

    #[test]
    fn test_silent_playback_is_not_audible() {
        let mut channel = AudioChannel::new(ChannelKind::Breathing);
        channel.install(Box::new(RecordingSink(Rc::new(RefCell::new(SinkLog::default())))));
        channel.play();
        channel.set_volume(0.0);
        assert!(channel.is_playing());
        assert!(!channel.is_audible());
    }
}
