use crate::beat::BeatGrid;
use crate::game::{GamePhase, PhaseTrigger};
use crate::input::ActionEdge;
use crate::ipc::{ChartSource, Command, Event, FrameSnapshot, HostFrame, UpcomingEvent};
use crate::report::export_session_report;
use crate::session::PlaySession;
use clickhero_domain_chart::{
    import_chart_path, triple_click_theme, Chart, ChartImportError, ScheduleError, Timeline,
};
use clickhero_domain_eval::{ResolverConfig, ThresholdError, ThresholdTable};
use clickhero_ports::playback::{PlaybackClockPort, PlaybackError};
use clickhero_ports::storage::{SettingsDto, StorageError, StoragePort};
use clickhero_ports::types::Seconds;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const LANE_HORIZON_S: Seconds = 4.0;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("playback error: {0}")]
    Playback(#[from] PlaybackError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("chart load failed: {0}")]
    ChartLoad(#[from] ChartImportError),
    #[error("invalid schedule: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("invalid timing windows: {0}")]
    Threshold(#[from] ThresholdError),
    #[error("invalid setting: {0}")]
    InvalidSetting(String),
}

pub struct AppCore {
    playback: Box<dyn PlaybackClockPort>,
    storage: Option<Box<dyn StoragePort>>,
    settings: SettingsDto,
    table: ThresholdTable,
    chart: Chart,
    timeline: Arc<Timeline>,
    beat_grid: BeatGrid,
    session: PlaySession,
    action_edge: ActionEdge,
    events: VecDeque<Event>,
}

impl AppCore {
    pub fn new(
        playback: Box<dyn PlaybackClockPort>,
        storage: Option<Box<dyn StoragePort>>,
        chart: Chart,
    ) -> Result<Self, AppError> {
        let settings = match storage.as_ref() {
            Some(storage) => storage.load_settings().unwrap_or_else(|err| {
                warn!(%err, "could not load settings, using defaults");
                SettingsDto::default()
            }),
            None => SettingsDto::default(),
        };

        let table = ThresholdTable::from_windows(settings.timing_windows).unwrap_or_else(|err| {
            warn!(%err, "stored timing windows rejected, using defaults");
            ThresholdTable::default()
        });

        let timeline = Arc::new(chart.timeline()?);
        let beat_grid = BeatGrid::new(chart.bpm, chart.beats_per_bar);
        let session = PlaySession::new(
            timeline.clone(),
            resolver_config(&settings),
            table.clone(),
            GamePhase::Start,
        );

        let mut core = Self {
            playback,
            storage,
            settings,
            table,
            chart,
            timeline,
            beat_grid,
            session,
            action_edge: ActionEdge::default(),
            events: VecDeque::new(),
        };
        core.emit_chart_loaded();
        Ok(core)
    }

    pub fn handle_command(&mut self, cmd: Command) -> Result<(), AppError> {
        match cmd {
            Command::Reset => {
                self.playback.stop()?;
                self.rebuild_session(GamePhase::Start);
            }
            Command::TogglePause => {
                self.toggle_pause()?;
            }
            Command::LoadChart { source } => {
                let chart = match source {
                    ChartSource::File(path) => import_chart_path(Path::new(&path))?,
                    ChartSource::Builtin => triple_click_theme(),
                };
                self.apply_chart(chart)?;
            }
            Command::SetInputOffsetMs { ms } => {
                self.settings.input_offset_ms = ms;
                self.settings_changed();
            }
            Command::SetTimingWindows { windows } => {
                self.table = ThresholdTable::from_windows(windows)?;
                self.settings.timing_windows = windows;
                self.settings_changed();
            }
            Command::SetMaxWindowS { seconds } => {
                if !seconds.is_finite() || seconds <= 0.0 {
                    return Err(AppError::InvalidSetting(format!(
                        "max window must be a positive number of seconds, got {seconds}"
                    )));
                }
                self.settings.max_window_s = seconds;
                self.settings_changed();
            }
            Command::ExportReport { path } => {
                export_session_report(
                    Path::new(&path),
                    &self.chart.title,
                    &self.session,
                    &self.settings,
                )?;
                info!(path = %path, "session report exported");
            }
        }
        Ok(())
    }

    // Button state is committed even when the frame fails.
    pub fn tick(&mut self, frame: HostFrame) -> Result<(), AppError> {
        let edge = self.action_edge.rising(frame.action_pressed);
        let result = self.step(edge);
        self.action_edge.commit(frame.action_pressed);
        result
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let now_s = self.playback.current_time_s();
        let first = self.timeline.first_at_or_after(now_s);
        let upcoming = self.timeline.events()[first..]
            .iter()
            .enumerate()
            .map(|(offset, event)| UpcomingEvent {
                index: first + offset,
                lead_s: event.time_s - now_s,
                tags: event.tags,
            })
            .take_while(|upcoming| upcoming.lead_s <= LANE_HORIZON_S)
            .collect();

        FrameSnapshot {
            phase: self.session.phase(),
            now_s,
            cue_visibility: self.session.cue_visibility(),
            cumulative_score: self.session.cumulative_score(),
            combo: self.session.stats().combo,
            last_result: self.session.last_result().cloned(),
            beat: self.beat_grid.position(now_s),
            time_remaining_s: self
                .playback
                .duration_s()
                .map(|duration_s| (duration_s - now_s).max(0.0).floor() as i64),
            upcoming,
        }
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn settings(&self) -> &SettingsDto {
        &self.settings
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    fn step(&mut self, edge: bool) -> Result<(), AppError> {
        let phase = self.session.phase();
        if edge && phase.next(PhaseTrigger::Action).is_some() {
            self.begin_play()?;
        }
        if self.session.phase() != GamePhase::Game {
            return Ok(());
        }

        let now_s = self.playback.current_time_s();
        self.dispatch(now_s);
        // Resolution and expiry share one clock, or an expired event could
        // still be reached by a late-calibrated action.
        let judged_s = self.judged_time(now_s);
        if edge && phase == GamePhase::Game {
            self.resolve_action(judged_s);
        }
        self.expire(judged_s);

        if self.playback.status().ended() {
            if let Some(next) = self.session.phase().next(PhaseTrigger::PlaybackEnded) {
                // Whatever is still open can no longer be played.
                self.expire(Seconds::INFINITY);
                self.session.set_phase(next);
                info!(
                    score = self.session.cumulative_score(),
                    max_combo = self.session.stats().max_combo,
                    "track finished"
                );
                self.events.push_back(Event::PhaseChanged { phase: next });
                self.emit_score_summary();
            }
        }
        Ok(())
    }

    fn begin_play(&mut self) -> Result<(), AppError> {
        let cue_s = self.settings.start_cue_s;
        self.playback.start(cue_s)?;
        self.rebuild_session(GamePhase::Game);
        let reach_s = self.session.resolver_config().max_window_s;
        self.session.skip_before(self.judged_time(cue_s) - reach_s);
        info!(cue_s, "playback started");
        self.events.push_back(Event::PhaseChanged {
            phase: GamePhase::Game,
        });
        Ok(())
    }

    fn dispatch(&mut self, now_s: Seconds) {
        for fired in self.session.advance(now_s) {
            self.events.push_back(Event::EventFired {
                index: fired.index,
                time_s: fired.event.time_s,
                tags: fired.event.tags,
                cues: self.session.cue_visibility(),
            });
        }
    }

    fn judged_time(&self, now_s: Seconds) -> Seconds {
        now_s + self.settings.input_offset_ms as Seconds / 1000.0
    }

    fn resolve_action(&mut self, at_s: Seconds) {
        match self.session.resolve_action(at_s) {
            Some(result) => {
                self.events.push_back(Event::ActionJudged { result });
                self.emit_score_summary();
            }
            None => {
                self.events.push_back(Event::ActionWhiffed { time_s: at_s });
            }
        }
    }

    fn expire(&mut self, now_s: Seconds) {
        let expired = self.session.expire_through(now_s);
        if expired.is_empty() {
            return;
        }
        for index in expired {
            debug!(index, "event expired without action");
            self.events.push_back(Event::EventExpired { index });
        }
        self.emit_score_summary();
    }

    fn toggle_pause(&mut self) -> Result<(), AppError> {
        if self.session.phase() != GamePhase::Game {
            return Ok(());
        }
        let status = self.playback.status();
        let paused = if status.paused {
            self.playback.resume()?;
            false
        } else if status.playing {
            self.playback.pause()?;
            true
        } else {
            return Ok(());
        };
        debug!(paused, "playback toggled");
        self.events.push_back(Event::PlaybackPaused { paused });
        Ok(())
    }

    fn apply_chart(&mut self, chart: Chart) -> Result<(), AppError> {
        let timeline = chart.timeline()?;
        self.playback.stop()?;
        self.timeline = Arc::new(timeline);
        self.beat_grid = BeatGrid::new(chart.bpm, chart.beats_per_bar);
        self.chart = chart;
        self.emit_chart_loaded();
        self.rebuild_session(GamePhase::Start);
        Ok(())
    }

    fn rebuild_session(&mut self, phase: GamePhase) {
        self.session = PlaySession::new(
            self.timeline.clone(),
            resolver_config(&self.settings),
            self.table.clone(),
            phase,
        );
        info!(?phase, events = self.timeline.len(), "session reset");
        self.events.push_back(Event::SessionReset { phase });
    }

    fn emit_chart_loaded(&mut self) {
        let clickable = self.timeline.clickable_count();
        info!(title = %self.chart.title, clickable, "chart loaded");
        self.events.push_back(Event::ChartLoaded {
            title: self.chart.title.clone(),
            clickable,
        });
    }

    fn emit_score_summary(&mut self) {
        let stats = self.session.stats();
        self.events.push_back(Event::ScoreSummaryUpdated {
            score: stats.score,
            combo: stats.combo,
            accuracy: stats.accuracy(),
        });
    }

    fn settings_changed(&mut self) {
        self.events.push_back(Event::SettingsUpdated {
            settings: self.settings.clone(),
        });
        if let Some(storage) = self.storage.as_ref() {
            if let Err(err) = storage.save_settings(&self.settings) {
                warn!(%err, "failed to save settings");
            }
        }
    }
}

fn resolver_config(settings: &SettingsDto) -> ResolverConfig {
    let max_window_s = settings.max_window_s;
    if max_window_s.is_finite() && max_window_s > 0.0 {
        ResolverConfig { max_window_s }
    } else {
        warn!(max_window_s, "invalid max window in settings, using default");
        ResolverConfig::default()
    }
}
