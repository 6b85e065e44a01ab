use crate::model::{Chart, CueId, EventTag, MusicEvent};
use crate::timeline::{ScheduleError, Timeline};
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum ChartImportError {
    #[error("io error: {0}")]
    Io(String),
    #[error("chart parse error: {0}")]
    Parse(String),
    #[error("invalid tempo: {0} bpm")]
    InvalidTempo(f64),
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
}

impl Chart {
    pub fn timeline(&self) -> Result<Timeline, ScheduleError> {
        Timeline::new(self.events.clone())
    }
}

pub fn import_chart_path(path: &Path) -> Result<Chart, ChartImportError> {
    let data = fs::read(path).map_err(|e| ChartImportError::Io(e.to_string()))?;
    import_chart_bytes(&data)
}

pub fn import_chart_bytes(data: &[u8]) -> Result<Chart, ChartImportError> {
    let chart: Chart =
        serde_json::from_slice(data).map_err(|e| ChartImportError::Parse(e.to_string()))?;
    if !chart.bpm.is_finite() || chart.bpm <= 0.0 {
        return Err(ChartImportError::InvalidTempo(chart.bpm));
    }
    chart.timeline()?;
    Ok(chart)
}

pub fn export_chart_json(chart: &Chart) -> Result<String, ChartImportError> {
    serde_json::to_string_pretty(chart).map_err(|e| ChartImportError::Parse(e.to_string()))
}

pub fn triple_click_theme() -> Chart {
    let mut events = Vec::new();
    for (clicks, hide_at) in [([1.090, 1.298, 1.532], 2.0), ([97.608, 97.817, 98.050], 98.6)] {
        for (time_s, cue) in clicks.into_iter().zip(CueId::ALL) {
            events.push(MusicEvent::new(
                time_s,
                [EventTag::Clickable, EventTag::CueOn(cue)],
            ));
        }
        events.push(MusicEvent::new(hide_at, CueId::ALL.map(EventTag::CueOff)));
    }

    Chart {
        title: "Triple Click Theme".to_string(),
        bpm: 110.0,
        beats_per_bar: 4,
        events,
    }
}
