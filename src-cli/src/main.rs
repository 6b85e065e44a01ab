use clickhero_core::{AppCore, AppError, Command, Event, FrameSnapshot, GamePhase, HostFrame};
use clickhero_domain_chart::{
    export_chart_json, import_chart_path, triple_click_theme, Chart, ChartImportError,
};
use clickhero_domain_eval::ScoreStats;
use clickhero_infra_clock_sim::SimulatedPlayback;
use clickhero_infra_storage_fs::FsStorage;
use clickhero_ports::storage::StorageError;
use clickhero_ports::types::Seconds;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const TAIL_S: Seconds = 2.0;

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Chart(#[from] ChartImportError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "clickhero")]
#[command(about = "Headless Triple Click Hero session runner", long_about = None)]
struct Args {
    /// Chart file, or the name of a chart in the library (defaults to the
    /// built-in Triple Click Theme)
    #[arg(short, long)]
    chart: Option<String>,

    /// List the charts in the library and exit
    #[arg(long)]
    list_charts: bool,

    /// Comma-separated playhead times (seconds) at which to click
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    clicks: Vec<Seconds>,

    /// Track length in seconds (default: last event plus two seconds)
    #[arg(short, long = "duration")]
    duration_s: Option<Seconds>,

    /// Simulated display frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Settings directory (defaults to the user config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Write a session report, into DIR or a fresh folder under the config dir
    #[arg(long, value_name = "DIR")]
    report: Option<Option<PathBuf>>,

    /// Print the chart as JSON and exit
    #[arg(long)]
    print_chart: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    chart: &'a str,
    frames: u64,
    snapshot: FrameSnapshot,
    stats: &'a ScoreStats,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run(Args::parse()) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let storage = match args.config_dir.clone() {
        Some(dir) => FsStorage::new(dir),
        None => FsStorage::default(),
    };
    if args.list_charts {
        for path in storage.list_charts()? {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let chart = match args.chart.as_deref() {
        Some(name) => {
            let path = storage
                .resolve_chart(name)
                .unwrap_or_else(|| PathBuf::from(name));
            import_chart_path(&path)?
        }
        None => triple_click_theme(),
    };
    if args.print_chart {
        println!("{}", export_chart_json(&chart)?);
        return Ok(());
    }

    let duration_s = args
        .duration_s
        .unwrap_or_else(|| last_event_s(&chart) + TAIL_S);
    let report_dir = args.report.clone().map(|dir| {
        dir.unwrap_or_else(|| storage.next_report_dir(&chart.title))
    });

    let clock = SimulatedPlayback::new(duration_s);
    let mut core = AppCore::new(Box::new(clock.clone()), Some(Box::new(storage)), chart)?;

    let frames = play(&mut core, &clock, &args)?;

    if let Some(dir) = report_dir {
        let path = dir.display().to_string();
        core.handle_command(Command::ExportReport { path })?;
    }

    let summary = RunSummary {
        chart: &core.chart().title,
        frames,
        snapshot: core.snapshot(),
        stats: core.session().stats(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn play(core: &mut AppCore, clock: &SimulatedPlayback, args: &Args) -> Result<u64, CliError> {
    let dt_s = 1.0 / args.fps as Seconds;
    let mut clicks = args.clicks.clone();
    clicks.sort_by(|a, b| a.total_cmp(b));
    let mut clicks = clicks.into_iter().peekable();
    let mut pressed = true;
    let mut frames = 0u64;

    core.tick(HostFrame {
        action_pressed: pressed,
    })?;
    log_events(core);

    while core.phase() != GamePhase::Wrapup {
        clock.advance(dt_s);
        frames += 1;

        let now_s = core.snapshot().now_s;
        let due = clicks.peek().map_or(false, |&at| at <= now_s);
        // A press needs a released frame before it, or the edge is lost.
        pressed = due && !pressed;
        if pressed {
            clicks.next();
        }

        core.tick(HostFrame {
            action_pressed: pressed,
        })?;
        log_events(core);
    }
    Ok(frames)
}

fn log_events(core: &mut AppCore) {
    for event in core.drain_events() {
        match event {
            Event::ActionJudged { result } => info!(
                event = result.event_index,
                tier = result.tier.label(),
                offset_ms = (result.offset_s * 1000.0).round() as i64,
                score = result.score,
                "{}",
                result.message
            ),
            Event::ActionWhiffed { time_s } => info!(time_s, "no event in reach"),
            Event::PhaseChanged { phase } => info!(?phase, "phase changed"),
            other => debug!(?other, "engine event"),
        }
    }
}

fn last_event_s(chart: &Chart) -> Seconds {
    chart.events.last().map_or(0.0, |event| event.time_s)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("clickhero").chain(argv.iter().copied()))
    }

    #[test]
    fn clicks_split_on_commas() {
        let parsed = args(&["--clicks", "1.3,1.09,1.5"]).unwrap();
        assert_eq!(parsed.clicks, vec![1.3, 1.09, 1.5]);
        assert!(args(&["--clicks", "1.0,soon"]).is_err());
    }

    #[test]
    fn flags_fill_args() {
        let parsed = args(&["--clicks", "1.09", "--fps", "120", "--duration", "4"]).unwrap();
        assert_eq!(parsed.fps, 120);
        assert_eq!(parsed.duration_s, Some(4.0));
        assert_eq!(parsed.clicks, vec![1.09]);
        assert!(!parsed.print_chart);
        assert_eq!(parsed.report, None);

        assert_eq!(args(&["--report"]).unwrap().report, Some(None));
        assert_eq!(
            args(&["--report", "out"]).unwrap().report,
            Some(Some(PathBuf::from("out")))
        );

        assert_eq!(args(&[]).unwrap().fps, 60);
        assert!(args(&["--fps", "0"]).is_err());
        assert!(args(&["--bogus"]).is_err());
    }

    #[test]
    fn scripted_run_scores_the_builtin_chart() {
        let chart = triple_click_theme();
        let clock = SimulatedPlayback::new(3.0);
        let mut core = AppCore::new(Box::new(clock.clone()), None, chart).unwrap();
        // Out of order on purpose; the runner sorts them.
        let args = args(&["--clicks", "1.3,1.09,1.53", "--fps", "240"]).unwrap();

        play(&mut core, &clock, &args).unwrap();

        let stats = core.session().stats();
        assert_eq!(core.phase(), GamePhase::Wrapup);
        assert_eq!(stats.hits(), 3);
        // The second phrase lies past the end of this short track.
        assert_eq!(stats.expired, 3);
    }
}
