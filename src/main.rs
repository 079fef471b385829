use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use telemetry_replay::playback::{EndOfSeries, PlaybackSpeed};
use telemetry_replay::session::Session;
use telemetry_replay::settings::{OutputFormat, ReplaySettings};
use telemetry_replay::ui::{self, Command, Outcome};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Replay a telemetry CSV log with play/pause, seek and variable speed.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// CSV log with a `time` column (throttle, speed, rpm, lat, long optional)
    file: PathBuf,

    /// Playback speed: 0.5x, 1x, 2x, 4x or a tick interval of 500/200/100/50 ms
    #[arg(long)]
    speed: Option<PlaybackSpeed>,

    /// Sample index to start from
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Start playing immediately
    #[arg(long)]
    autoplay: bool,

    /// Pause instead of holding the last sample when playback reaches the end
    #[arg(long)]
    pause_at_end: bool,

    /// Frame output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    save_settings: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr, frames to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => ReplaySettings::load_or_default(path),
        None => ReplaySettings::load(),
    };
    if let Some(speed) = args.speed {
        settings.speed = speed;
    }
    if let Some(format) = args.format {
        settings.format = format;
    }
    if args.pause_at_end {
        settings.end_of_series = EndOfSeries::Pause;
    }

    if args.save_settings {
        let saved = match &args.config {
            Some(path) => settings.save_to(path).map(|_| path.clone()),
            None => settings.save(),
        };
        match saved {
            Ok(path) => info!("Saved settings to {}", path.display()),
            Err(e) => warn!("Could not save settings: {}", e),
        }
    }

    let mut session = Session::with_settings(&settings);
    session.load_file(&args.file)?;
    if session.series().is_empty() {
        warn!("{} has no rows with a time value", args.file.display());
    }
    if args.start > 0 {
        session.scrub(args.start);
    }
    if args.autoplay {
        session.play();
    }

    // Ticks and commands are handled one at a time on a single thread
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    rt.block_on(run(session, settings.format))
}

async fn run(mut session: Session, format: OutputFormat) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut last_index = session.state().current_index;

    println!("{}", ui::render(&session, format));

    loop {
        tokio::select! {
            index = session.next_tick() => {
                if index != last_index {
                    last_index = index;
                    println!("{}", ui::render(&session, format));
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line.context("Failed to read command input")? else {
                    stdin_open = false;
                    continue;
                };

                match Command::parse(&line) {
                    Ok(command) => match ui::apply(&mut session, command) {
                        Outcome::Render => {
                            last_index = session.state().current_index;
                            println!("{}", ui::render(&session, format));
                        }
                        Outcome::Message(msg) => println!("{}", msg),
                        Outcome::Quit => break,
                    },
                    Err(e) => eprintln!("{} (type 'help' for commands)", e),
                }
            }
        }

        // Without input, run until playback can make no further progress
        if !stdin_open && (!session.is_playing() || session.at_end()) {
            break;
        }
    }

    Ok(())
}
