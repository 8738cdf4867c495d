/// Playback sinks
///
/// The controller talks to audio output only through [`PlaybackSink`]. The
/// rodio implementation lives here; tests plug in recording sinks instead.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::loader::ClipData;
use super::source::ChannelKind;
use crate::error::AudioError;
use crate::host::OutputBus;

/// Capabilities of one playable clip
pub trait PlaybackSink {
    /// Start playback from the beginning of the clip
    fn play(&mut self) -> Result<(), AudioError>;

    /// Stop playback and discard anything queued
    fn stop(&mut self);

    /// Set volume (0.0-1.0)
    fn set_volume(&mut self, volume: f32);

    /// Check if audio is playing
    fn is_playing(&self) -> bool;

    /// Repeat the clip until stopped; takes effect on the next `play`
    fn set_loop(&mut self, looped: bool);

    /// Route output through a bus
    fn set_output_bus(&mut self, bus: &OutputBus);
}

/// Turns published clip data into a sink for one channel
pub trait AudioBackend {
    fn create_sink(
        &self,
        kind: ChannelKind,
        clip: &ClipData,
    ) -> Result<Box<dyn PlaybackSink>, AudioError>;
}

/// rodio backend sharing a single output stream between both channels
pub struct RodioBackend {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioBackend {
    /// Open the default output device
    pub fn try_default() -> Result<Self, AudioError> {
        let (stream, stream_handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl AudioBackend for RodioBackend {
    fn create_sink(
        &self,
        kind: ChannelKind,
        clip: &ClipData,
    ) -> Result<Box<dyn PlaybackSink>, AudioError> {
        // Verify the clip decodes before the channel considers it ready
        let cursor = Cursor::new(clip.bytes().to_vec());
        Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed(Box::new(e)))?;

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;

        tracing::debug!(
            "Created {} sink from {} ({} bytes)",
            kind,
            clip.path().display(),
            clip.len()
        );

        Ok(Box::new(RodioSink {
            kind,
            stream_handle: self.stream_handle.clone(),
            sink,
            audio_data: clip.shared_bytes(),
            looped: kind.loops(),
            volume: 1.0,
            bus_gain: 1.0,
        }))
    }
}

/// rodio-backed sink for one channel
pub struct RodioSink {
    kind: ChannelKind,
    stream_handle: OutputStreamHandle,
    sink: Sink,
    audio_data: Arc<Vec<u8>>,
    looped: bool,
    volume: f32,
    bus_gain: f32,
}

impl RodioSink {
    fn apply_volume(&self) {
        self.sink.set_volume(self.volume * self.bus_gain);
    }
}

impl PlaybackSink for RodioSink {
    fn play(&mut self) -> Result<(), AudioError> {
        // rodio's Decoder needs owned data with a 'static lifetime
        let cursor = Cursor::new((*self.audio_data).clone());
        if self.looped {
            let source =
                Decoder::new_looped(cursor).map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
            self.sink.append(source);
        } else {
            let source =
                Decoder::new(cursor).map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
            self.sink.append(source);
        }

        self.apply_volume();
        self.sink.play();
        tracing::trace!("rodio sink playing: {}", self.kind);
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.stop();
        // A fresh sink guarantees the next play starts from an empty queue
        match Sink::try_new(&self.stream_handle) {
            Ok(new_sink) => {
                self.sink = new_sink;
                self.apply_volume();
            }
            Err(e) => tracing::warn!("Could not recreate {} sink: {}", self.kind, e),
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_volume();
    }

    fn is_playing(&self) -> bool {
        !self.sink.empty()
    }

    fn set_loop(&mut self, looped: bool) {
        self.looped = looped;
    }

    fn set_output_bus(&mut self, bus: &OutputBus) {
        self.bus_gain = bus.gain();
        self.apply_volume();
    }
}
