use crate::beat::BeatPosition;
use crate::game::GamePhase;
use clickhero_domain_chart::{CueVisibility, TagSet};
use clickhero_domain_eval::ScoreResult;
use clickhero_ports::storage::{SettingsDto, TimingWindowsDto};
use clickhero_ports::types::Seconds;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ChartSource {
    File(String),
    Builtin,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Command {
    Reset,
    TogglePause,
    LoadChart { source: ChartSource },
    SetInputOffsetMs { ms: i32 },
    SetTimingWindows { windows: TimingWindowsDto },
    SetMaxWindowS { seconds: Seconds },
    ExportReport { path: String },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostFrame {
    pub action_pressed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEvent {
    pub index: usize,
    pub lead_s: Seconds,
    pub tags: TagSet,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub now_s: Seconds,
    pub cue_visibility: CueVisibility,
    pub cumulative_score: i64,
    pub combo: u32,
    pub last_result: Option<ScoreResult>,
    pub beat: BeatPosition,
    pub time_remaining_s: Option<i64>,
    pub upcoming: Vec<UpcomingEvent>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    ChartLoaded { title: String, clickable: usize },
    SessionReset { phase: GamePhase },
    PhaseChanged { phase: GamePhase },
    PlaybackPaused { paused: bool },
    EventFired {
        index: usize,
        time_s: Seconds,
        tags: TagSet,
        cues: CueVisibility,
    },
    ActionJudged { result: ScoreResult },
    ActionWhiffed { time_s: Seconds },
    EventExpired { index: usize },
    ScoreSummaryUpdated { score: i64, combo: u32, accuracy: f32 },
    SettingsUpdated { settings: SettingsDto },
}
