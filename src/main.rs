//! Stand-alone host for the breathing controller.
//!
//! Reads one frame per stdin line, `<g-load> [int|ext] [noaudio]`, and drives
//! the controller on a fixed tick. The first frame counts as the player
//! spawning. EOF lets the recovery clip finish and then tears down.

use std::io::BufRead;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use crossbeam_channel::{tick, unbounded, Receiver, TryRecvError};
use parking_lot::Mutex;

use g_breathing::logging::{initialize_tracing, log_runtime_environment, resolve_log_dir};
use g_breathing::{
    BreathingController, ClipPaths, Config, ControllerSettings, GLoadSource, OutputBus,
    RodioBackend, ViewContext, ViewContextSource,
};

/// One simulation frame as seen by the host
#[derive(Debug, Clone, Copy, PartialEq)]
struct HostFrame {
    g_load: f32,
    view: ViewContext,
}

impl Default for HostFrame {
    fn default() -> Self {
        Self {
            g_load: 0.0,
            view: ViewContext::interior(),
        }
    }
}

/// Latest frame, shared between the input side and the controller's sources
#[derive(Clone, Default)]
struct SharedFrame(Arc<Mutex<HostFrame>>);

impl SharedFrame {
    fn update(&self, frame: HostFrame) {
        *self.0.lock() = frame;
    }
}

impl GLoadSource for SharedFrame {
    fn current_value(&self) -> f32 {
        self.0.lock().g_load
    }
}

impl ViewContextSource for SharedFrame {
    fn current(&self) -> ViewContext {
        self.0.lock().view
    }
}

fn parse_frame(line: &str) -> Result<HostFrame, String> {
    let mut tokens = line.split_whitespace();

    let g_load = tokens
        .next()
        .ok_or_else(|| "empty line".to_string())?
        .parse::<f32>()
        .map_err(|e| format!("invalid G-load: {}", e))?;

    let mut exterior = false;
    let mut camera_audio = true;
    for token in tokens {
        match token {
            "int" => exterior = false,
            "ext" => exterior = true,
            "noaudio" => camera_audio = false,
            other => return Err(format!("unknown token '{}'", other)),
        }
    }

    Ok(HostFrame {
        g_load,
        view: ViewContext {
            exterior_audio_active: exterior && camera_audio,
            is_interior_view: !exterior,
        },
    })
}

/// Outcome of one tick's look at the input channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameStatus {
    /// A frame was taken and published
    Fresh,
    /// Nothing queued; the previous frame stays current
    Idle,
    /// Input is gone; the load reads 0 so breathing winds down
    Closed,
}

/// Take at most one queued frame so every sample gets its own tick
fn next_frame(frames: &Receiver<HostFrame>, shared: &SharedFrame) -> FrameStatus {
    match frames.try_recv() {
        Ok(frame) => {
            shared.update(frame);
            FrameStatus::Fresh
        }
        Err(TryRecvError::Empty) => FrameStatus::Idle,
        Err(TryRecvError::Disconnected) => {
            let view = shared.current();
            shared.update(HostFrame { g_load: 0.0, view });
            FrameStatus::Closed
        }
    }
}

/// Forward stdin frames until EOF; the channel closes when this thread ends
fn spawn_input_reader() -> anyhow::Result<Receiver<HostFrame>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("stdin-frames".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for (number, line) in stdin.lock().lines().enumerate() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() || line.trim_start().starts_with('#') {
                    continue;
                }
                match parse_frame(&line) {
                    Ok(frame) => {
                        if tx.send(frame).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Skipping line {}: {}", number + 1, e),
                }
            }
            tracing::debug!("Input closed");
        })
        .context("Failed to start stdin reader")?;
    Ok(rx)
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let install_dir = Config::install_dir().context("Failed to resolve installation directory")?;

    initialize_tracing(
        &resolve_log_dir(config.log_dir.as_deref(), &install_dir),
        &config.log_level,
    );
    log_runtime_environment();
    tracing::info!(
        "Threshold {} G, attenuation {}, tick {} ms",
        config.activation_threshold,
        config.attenuation,
        config.tick_ms
    );

    let backend = RodioBackend::try_default().context("Failed to open audio output")?;
    let mut controller =
        BreathingController::new(ControllerSettings::from(&config), Box::new(backend));
    controller.start_loading(&ClipPaths::resolve(&install_dir, &config));

    let frames = spawn_input_reader()?;
    let ticker = tick(Duration::from_millis(config.tick_ms));
    let shared = SharedFrame::default();
    let mixer = Some(OutputBus::new("Interior", config.interior_bus_gain));
    let mut input_open = true;

    for _ in ticker.iter() {
        match next_frame(&frames, &shared) {
            FrameStatus::Fresh if !controller.is_attached() => {
                tracing::info!("Player spawned");
                controller.on_subject_attached(
                    Box::new(shared.clone()),
                    Box::new(shared.clone()),
                    &mixer,
                );
            }
            FrameStatus::Closed if input_open => {
                input_open = false;
                tracing::info!("End of input, waiting for playback to finish");
            }
            _ => {}
        }

        controller.on_tick();
        if !input_open && controller.state().is_idle() {
            break;
        }
    }

    controller.on_teardown();
    Ok(())
}
