/// application settings for the visualizer
/// persisted as JSON next to the binary's working directory
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controller::ControllerConfig;
use crate::engine::{Algorithm, Pacing};
use crate::sequence::DEFAULT_AMOUNT;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    // window / render loop
    pub window_width: f32,
    pub window_height: f32,
    /// target frames per second of the render/input loop
    pub frame_rate: u32,

    // phase timing
    /// element amount used when none is given on the command line
    pub default_amount: usize,
    /// wall time of the animated shuffle, spread evenly over all elements
    pub shuffle_secs: f64,
    /// wall time of the confirmation sweep (N / scan_secs marks per second)
    pub scan_secs: f64,
    /// how long the benchmark result stays on screen before the restart
    pub cooldown_secs: f64,

    // workers
    /// sleep between pause-flag polls inside a paused task
    pub pause_poll_ms: u64,
    /// stack size for worker threads (recursive sorts on thousands of elements)
    pub worker_stack_mib: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            window_width: 1900.0,
            window_height: 800.0,
            frame_rate: 60,
            default_amount: DEFAULT_AMOUNT,
            shuffle_secs: 2.0,
            scan_secs: 1.9,
            cooldown_secs: 5.0,
            pause_poll_ms: 2,
            worker_stack_mib: 64,
        }
    }
}

impl AppSettings {
    /// save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// load settings from a JSON file, or return defaults if it is missing or broken
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("failed to parse {}: {}. using defaults.", path.display(), e);
                    Self::default()
                }
            },
            // file doesn't exist or can't be read - use defaults
            Err(_) => Self::default(),
        }
    }

    /// time budget of one render frame
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate.max(1) as f64)
    }

    /// convert to the controller's configuration for one process run
    pub fn to_controller_config(&self, algorithm: Algorithm, amount: usize, seed: u64) -> ControllerConfig {
        ControllerConfig {
            algorithm,
            amount,
            seed,
            pacing: Pacing::Default,
            shuffle_secs: self.shuffle_secs,
            scan_secs: self.scan_secs,
            cooldown: Duration::from_secs_f64(self.cooldown_secs.max(0.0)),
            pause_poll: Duration::from_millis(self.pause_poll_ms.max(1)),
            worker_stack_bytes: self.worker_stack_mib.max(1) << 20,
        }
    }
}
