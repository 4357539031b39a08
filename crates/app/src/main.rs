use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use tracing_subscriber::EnvFilter;

use api::{ApiConfig, HttpSessionSource};
use services::{
    color_for, AnalyticsService, ChartData, ChartMode, DateRange, PlanFilter, PollHandle,
    SessionStore, POLL_PERIOD,
};
use shot_core::model::PlanId;
use shot_core::Clock;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPlanId { raw: String },
    InvalidDays { raw: String },
    InvalidMode { raw: String },
    InvalidPollSecs { raw: String },
    MissingApiUrl,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPlanId { raw } => write!(f, "invalid --plan-id value: {raw}"),
            ArgsError::InvalidDays { raw } => write!(f, "invalid --days value: {raw}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
            ArgsError::InvalidPollSecs { raw } => write!(f, "invalid --poll-secs value: {raw}"),
            ArgsError::MissingApiUrl => {
                write!(f, "no API url; pass --api-url or set SHOTTRAK_API_URL")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Stats,
    Watch,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "stats" => Some(Self::Stats),
            "watch" => Some(Self::Watch),
            _ => None,
        }
    }
}

struct Args {
    config: ApiConfig,
    plan: PlanFilter,
    days: Option<i64>,
    mode: ChartMode,
    poll_period: Duration,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let env_config = ApiConfig::from_env();
        let mut base_url = env_config.as_ref().map(|c| c.base_url.clone());
        let mut token = env_config.and_then(|c| c.token);
        let mut plan = PlanFilter::All;
        let mut days = None;
        let mut mode = ChartMode::Overview;
        let mut poll_period = POLL_PERIOD;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if !value.trim().is_empty() {
                        base_url = Some(value);
                    }
                }
                "--token" => {
                    token = Some(require_value(args, "--token")?);
                }
                "--plan-id" => {
                    let value = require_value(args, "--plan-id")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPlanId { raw: value.clone() })?;
                    plan = PlanFilter::Plan(PlanId::new(parsed));
                }
                "--days" => {
                    let value = require_value(args, "--days")?;
                    let parsed: i64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidDays { raw: value.clone() })?;
                    days = Some(parsed);
                }
                "--mode" => {
                    let value = require_value(args, "--mode")?;
                    mode = match value.as_str() {
                        "overview" => ChartMode::Overview,
                        "breakdown" => ChartMode::Breakdown,
                        _ => return Err(ArgsError::InvalidMode { raw: value }),
                    };
                }
                "--poll-secs" => {
                    let value = require_value(args, "--poll-secs")?;
                    let parsed: u64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidPollSecs { raw: value.clone() })?;
                    poll_period = Duration::from_secs(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let base_url = base_url.ok_or(ArgsError::MissingApiUrl)?;
        Ok(Self {
            config: ApiConfig::new(base_url, token),
            plan,
            days,
            mode,
            poll_period,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- stats [options]   # one-shot refresh and report");
    eprintln!("  cargo run -p app -- watch [options]   # keep polling until Ctrl-C");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url <url>      collaborator base url");
    eprintln!("  --token <token>      bearer token");
    eprintln!("  --plan-id <id>       only sessions of this plan");
    eprintln!("  --days <n>           date window: last n days");
    eprintln!("  --mode <m>           overview | breakdown (default overview)");
    eprintln!("  --poll-secs <n>      watch poll period (default 30)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  SHOTTRAK_API_URL, SHOTTRAK_API_TOKEN");
}

fn build_service(args: &Args) -> AnalyticsService {
    let source = HttpSessionSource::new(args.config.clone());
    let store = Arc::new(SessionStore::new(Arc::new(source)));
    let clock = Clock::default_clock();

    let mut service = AnalyticsService::new(clock, store);
    service.set_plan_filter(args.plan);
    if let Some(days) = args.days {
        let now = clock.now();
        service.set_date_range(DateRange::new(now - ChronoDuration::days(days), now));
    }
    service
}

fn report(service: &mut AnalyticsService, mode: ChartMode) {
    let state = service.filtered_and_selected();
    println!(
        "{} of {} sessions selected",
        state.selected_ids.len(),
        state.available.len()
    );

    let highlights = service.highlights();
    println!("total attempts : {}", highlights.total_attempts);
    println!("total goals    : {}", highlights.total_goals);
    match highlights.best_accuracy_date {
        Some(date) => println!(
            "best accuracy  : {}% on {}",
            highlights.best_accuracy,
            date.format("%-m/%-d/%Y")
        ),
        None => println!("best accuracy  : {}%", highlights.best_accuracy),
    }

    let top = service.top_sessions(5);
    if !top.is_empty() {
        println!();
        println!("top sessions");
        for (rank, entry) in top.iter().enumerate() {
            let session = &entry.session;
            let label = session.name().unwrap_or_else(|| session.token());
            println!(
                "  {}. {} - {:.0}% ({}/{})",
                rank + 1,
                label,
                entry.accuracy,
                session.total_goals(),
                session.total_attempts()
            );
        }
    }

    println!();
    match service.chart_data(mode) {
        ChartData::Overview(points) => {
            println!("overview ({} points)", points.len());
            for point in points {
                println!(
                    "  {:<16} {:>3}%  {}",
                    point.label,
                    point.accuracy,
                    color_for(point.session_index)
                );
            }
        }
        ChartData::Breakdown(rows) => {
            println!("breakdown ({} sessions)", rows.len());
            for row in rows {
                let shots: Vec<String> = row
                    .shots
                    .iter()
                    .map(|(slot, accuracy)| format!("S{slot}={accuracy}%"))
                    .collect();
                println!("  {:<12} {}  {}", row.name, row.date, shots.join(" "));
            }
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Stats,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Stats,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let mut service = build_service(&args);

    match cmd {
        Command::Stats => {
            service.refresh().await?;
            report(&mut service, args.mode);
            Ok(())
        }
        Command::Watch => {
            // The poll handle owns the timer; dropping it on exit cancels
            // the background refresh.
            let poller = PollHandle::start(service.store(), args.poll_period);
            let mut ticker = tokio::time::interval(args.poll_period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        report(&mut service, args.mode);
                        println!("---");
                    }
                    _ = tokio::signal::ctrl_c() => {
                        poller.stop();
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
