use crate::session::PlaySession;
use clickhero_domain_eval::{ScoreResult, ScoreStats};
use clickhero_ports::storage::{SettingsDto, StorageError};
use clickhero_ports::types::Seconds;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct AppVersion {
    name: String,
    version: String,
}

#[derive(Serialize)]
struct EventReport {
    index: usize,
    time_s: Seconds,
    clickable: bool,
    consumed_at_s: Option<Seconds>,
    result: Option<ScoreResult>,
}

#[derive(Serialize)]
struct SessionSummary<'a> {
    chart_title: &'a str,
    score: i64,
    accuracy: f32,
    stats: &'a ScoreStats,
    events: Vec<EventReport>,
}

pub fn export_session_report(
    dir: &Path,
    chart_title: &str,
    session: &PlaySession,
    settings: &SettingsDto,
) -> Result<(), StorageError> {
    fs::create_dir_all(dir).map_err(|e| StorageError::Io(e.to_string()))?;

    let app_version = AppVersion {
        name: "ClickHero".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let events = session
        .event_states()
        .iter()
        .map(|state| EventReport {
            index: state.index(),
            time_s: state.event().time_s,
            clickable: state.event().is_clickable(),
            consumed_at_s: state.consumed_at_s(),
            result: state.result().cloned(),
        })
        .collect();

    let stats = session.stats();
    let summary = SessionSummary {
        chart_title,
        score: session.cumulative_score(),
        accuracy: stats.accuracy(),
        stats,
        events,
    };

    write_json(&dir.join("app_version.json"), &app_version)?;
    write_json(&dir.join("settings.json"), settings)?;
    write_json(&dir.join("summary.json"), &summary)?;

    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let data = serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serde(e.to_string()))?;
    fs::write(path, data).map_err(|e| StorageError::Io(e.to_string()))
}
