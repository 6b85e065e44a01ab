use crate::types::Seconds;
use serde::{Deserialize, Serialize};

fn default_max_window_s() -> Seconds {
    0.5
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serde(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingWindowsDto {
    pub perfect: Seconds,
    pub great: Seconds,
    pub good: Seconds,
    pub ok: Seconds,
}

impl Default for TimingWindowsDto {
    fn default() -> Self {
        Self {
            perfect: 0.015,
            great: 0.03,
            good: 0.05,
            ok: 0.25,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDto {
    #[serde(default = "default_max_window_s")]
    pub max_window_s: Seconds,
    pub timing_windows: TimingWindowsDto,
    pub input_offset_ms: i32,
    pub start_cue_s: Seconds,
}

impl Default for SettingsDto {
    fn default() -> Self {
        Self {
            max_window_s: default_max_window_s(),
            timing_windows: TimingWindowsDto::default(),
            input_offset_ms: 0,
            start_cue_s: 0.0,
        }
    }
}

pub trait StoragePort: Send + Sync {
    fn load_settings(&self) -> Result<SettingsDto, StorageError>;
    fn save_settings(&self, s: &SettingsDto) -> Result<(), StorageError>;
}
