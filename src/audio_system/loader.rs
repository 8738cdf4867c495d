/// Background clip loading
///
/// Each clip is read on its own thread and handed back through a crossbeam
/// channel. The controller drains that channel on its tick thread, so a clip
/// only becomes visible to playback once it is fully built.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender, TryIter};

use super::source::ChannelKind;
use crate::config::Config;
use crate::error::AudioError;

/// Raw clip bytes kept in memory for repeated decoding
#[derive(Debug, Clone)]
pub struct ClipData {
    path: PathBuf,
    bytes: Arc<Vec<u8>>,
}

impl ClipData {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes: Arc::new(bytes),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn shared_bytes(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Read a clip file into memory
pub fn read_clip(path: &Path) -> Result<ClipData, AudioError> {
    if !path.exists() {
        return Err(AudioError::NotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = std::fs::read(path).map_err(|source| AudioError::LoadFailed {
        path: path.display().to_string(),
        source,
    })?;

    if bytes.is_empty() {
        return Err(AudioError::EmptyClip {
            path: path.display().to_string(),
        });
    }

    Ok(ClipData::new(path, bytes))
}

/// Locations of both clips
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipPaths {
    pub breathing: PathBuf,
    pub ending: PathBuf,
}

impl ClipPaths {
    /// `<install_dir>/<sounds_dir>/<clip>` for both clips
    pub fn resolve(install_dir: &Path, config: &Config) -> Self {
        let sounds = install_dir.join(&config.sounds_dir);
        Self {
            breathing: sounds.join(&config.breathing_clip),
            ending: sounds.join(&config.ending_clip),
        }
    }

    pub fn get(&self, kind: ChannelKind) -> &Path {
        match kind {
            ChannelKind::Breathing => &self.breathing,
            ChannelKind::Ending => &self.ending,
        }
    }
}

/// Completion of one background load
#[derive(Debug)]
pub struct LoadOutcome {
    pub kind: ChannelKind,
    pub result: Result<ClipData, AudioError>,
}

/// Fire-and-forget loader; no timeout, no cancellation
pub struct ClipLoader {
    sender: Sender<LoadOutcome>,
    receiver: Receiver<LoadOutcome>,
}

impl ClipLoader {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Start loading `path` for `kind` on a background thread
    pub fn spawn(&self, kind: ChannelKind, path: PathBuf) {
        tracing::info!("Starting audio load for {}: {}", kind, path.display());

        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("clip-loader-{}", kind.to_string().to_lowercase()))
            .spawn(move || {
                let result = read_clip(&path);
                // Receiver gone means the controller was torn down
                if sender.send(LoadOutcome { kind, result }).is_err() {
                    tracing::debug!("Dropping {} clip load, controller torn down", kind);
                }
            });

        if let Err(e) = spawned {
            tracing::error!("Failed to start {} clip loader: {}", kind, e);
        }
    }

    /// Completed loads, without blocking
    pub fn completed(&self) -> TryIter<'_, LoadOutcome> {
        self.receiver.try_iter()
    }
}

impl Default for ClipLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::{Duration, Instant};

    fn write_temp_clip(name: &str, bytes: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    fn wait_for_outcome(loader: &ClipLoader) -> LoadOutcome {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = loader.completed().next() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "clip load never completed");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_read_clip_missing_file() {
        let result = read_clip(Path::new("definitely_missing_gbreath.ogg"));
        assert!(matches!(result, Err(AudioError::NotFound { .. })));
    }

    #[test]
    fn test_read_clip_rejects_empty_file() {
        let path = write_temp_clip("gbreathing_loader_empty.ogg", &[]);
        let result = read_clip(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(AudioError::EmptyClip { .. })));
    }

    #[test]
    fn test_spawned_load_publishes_bytes() {
        let path = write_temp_clip("gbreathing_loader_ok.ogg", b"OggS fake clip");
        let loader = ClipLoader::new();
        loader.spawn(ChannelKind::Ending, path.clone());

        let outcome = wait_for_outcome(&loader);
        let _ = std::fs::remove_file(&path);

        assert_eq!(outcome.kind, ChannelKind::Ending);
        let clip = outcome.result.unwrap();
        assert_eq!(clip.bytes(), b"OggS fake clip");
        assert_eq!(clip.path(), path.as_path());
    }

    #[test]
    fn test_spawned_load_reports_failure() {
        let loader = ClipLoader::new();
        loader.spawn(
            ChannelKind::Breathing,
            PathBuf::from("no_such_dir/GBreath.ogg"),
        );

        let outcome = wait_for_outcome(&loader);
        assert_eq!(outcome.kind, ChannelKind::Breathing);
        assert!(outcome.result.is_err());
    }

    #[test]
    fn test_clip_paths_resolve() {
        let config = Config::default();
        let paths = ClipPaths::resolve(Path::new("/mods/GBreathing"), &config);
        assert_eq!(
            paths.get(ChannelKind::Breathing),
            Path::new("/mods/GBreathing/Sounds/GBreath.ogg")
        );
        assert_eq!(
            paths.get(ChannelKind::Ending),
            Path::new("/mods/GBreathing/Sounds/GBreath_End.ogg")
        );
    }
}
