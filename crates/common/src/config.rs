//! Application configuration.
//!
//! All tunables are fixed at startup; nothing is runtime-mutable.
//! Defaults describe the stock eye: 800x600 surface, 100px eye,
//! 30px pupil, 2-5s blink intervals, 100-300ms blinks, 0.1 pursuit
//! step, damping 5, 60Hz.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{IrisError, IrisResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Eye rendering and behavior tunables.
    pub eye: EyeConfig,

    /// Motion extraction tunables.
    pub vision: VisionConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Eye geometry, blink timing, and pursuit tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EyeConfig {
    /// Rendering surface width in pixels.
    pub screen_width: u32,

    /// Rendering surface height in pixels.
    pub screen_height: u32,

    /// Eye (sclera) radius in pixels.
    pub eye_radius: f64,

    /// Pupil radius at full size in pixels.
    pub pupil_base_radius: f64,

    /// Minimum idle time between blinks (ms).
    pub blink_interval_min_ms: u64,

    /// Maximum idle time between blinks (ms).
    pub blink_interval_max_ms: u64,

    /// Minimum blink duration (ms).
    pub blink_duration_min_ms: u64,

    /// Maximum blink duration (ms).
    pub blink_duration_max_ms: u64,

    /// Per-tick lerp step toward the gaze target, in (0, 1].
    pub pursuit_step: f64,

    /// Divisor converting pixel displacement to gaze offset.
    pub motion_damping: f64,

    /// Nominal tick rate of the control loop (Hz).
    pub tick_rate_hz: u32,
}

/// Motion extraction tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Background model learning rate in (0, 1).
    pub learning_rate: f64,

    /// Mahalanobis distance (in std deviations) above which a pixel
    /// is confident foreground.
    pub foreground_sigma: f64,

    /// Median filter window edge (pixels, odd).
    pub median_window: u32,

    /// Mask binarization threshold; near-saturated foreground only.
    pub mask_threshold: u8,

    /// Components smaller than this many pixels are ignored.
    pub min_blob_area: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "iris=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            eye: EyeConfig::default(),
            vision: VisionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            eye_radius: 100.0,
            pupil_base_radius: 30.0,
            blink_interval_min_ms: 2000,
            blink_interval_max_ms: 5000,
            blink_duration_min_ms: 100,
            blink_duration_max_ms: 300,
            pursuit_step: 0.1,
            motion_damping: 5.0,
            tick_rate_hz: 60,
        }
    }
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            foreground_sigma: 2.5,
            median_window: 5,
            mask_threshold: 250,
            min_blob_area: 1,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl EyeConfig {
    /// The eye center: middle of the rendering surface.
    pub fn eye_center(&self) -> (f64, f64) {
        (
            self.screen_width as f64 / 2.0,
            self.screen_height as f64 / 2.0,
        )
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }

    /// Reject configurations the tick loop cannot run with.
    pub fn validate(&self) -> IrisResult<()> {
        let eye = &self.eye;
        if eye.screen_width == 0 || eye.screen_height == 0 {
            return Err(IrisError::config("screen dimensions must be non-zero"));
        }
        if !(eye.pursuit_step > 0.0 && eye.pursuit_step <= 1.0) {
            return Err(IrisError::config("pursuit_step must be in (0, 1]"));
        }
        if eye.motion_damping <= 0.0 {
            return Err(IrisError::config("motion_damping must be positive"));
        }
        if eye.blink_interval_min_ms > eye.blink_interval_max_ms {
            return Err(IrisError::config("blink interval range is inverted"));
        }
        if eye.blink_duration_min_ms == 0 || eye.blink_duration_min_ms > eye.blink_duration_max_ms
        {
            return Err(IrisError::config("blink duration range is invalid"));
        }
        if eye.eye_radius <= 0.0 || eye.pupil_base_radius <= 0.0 {
            return Err(IrisError::config("eye radii must be positive"));
        }
        if eye.tick_rate_hz == 0 {
            return Err(IrisError::config("tick_rate_hz must be non-zero"));
        }
        let vision = &self.vision;
        if !(vision.learning_rate > 0.0 && vision.learning_rate < 1.0) {
            return Err(IrisError::config("learning_rate must be in (0, 1)"));
        }
        if vision.median_window % 2 == 0 {
            return Err(IrisError::config("median_window must be odd"));
        }
        Ok(())
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("iris").join("config.json")
}
