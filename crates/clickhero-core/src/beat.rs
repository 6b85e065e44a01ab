use clickhero_ports::types::Seconds;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatPosition {
    pub beat: u64,
    pub measure: u64,
    pub beat_in_bar: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeatGrid {
    bpm: f64,
    beats_per_bar: u32,
}

impl BeatGrid {
    pub fn new(bpm: f64, beats_per_bar: u32) -> Self {
        Self {
            bpm,
            beats_per_bar: beats_per_bar.max(1),
        }
    }

    pub fn position(&self, now_s: Seconds) -> BeatPosition {
        let beat = (now_s.max(0.0) / 60.0 * self.bpm).floor() as u64;
        let per_bar = self.beats_per_bar as u64;
        BeatPosition {
            beat,
            measure: beat / per_bar,
            beat_in_bar: (beat % per_bar) as u32 + 1,
        }
    }
}
