//! Head gesture recognizer: replays landmark frames and dispatches YES / NO / EMERGENCY.

use anyhow::{Context, Result};
use clap::Parser;
use head_gesture::{app::GestureApp, config::Config};
use log::info;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON-lines landmark frames to read (stdin when omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Notification endpoint, overrides the configuration file
    #[arg(short, long)]
    sink_url: Option<String>,

    /// Log gestures instead of sending them
    #[arg(long)]
    no_notify: bool,

    /// Print each detected gesture label to stdout
    #[arg(short, long)]
    echo: bool,

    /// Print the example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{}", head_gesture::config::EXAMPLE_CONFIG);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            Config::from_file(path).with_context(|| format!("Failed to load config file {path}"))?
        }
        None => Config::default(),
    };
    if let Some(url) = args.sink_url {
        config.notification.sink_url = url;
    }
    if args.no_notify {
        config.notification.enabled = false;
    }

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            info!("Reading frames from {}", path);
            Box::new(BufReader::new(
                File::open(path).with_context(|| format!("Failed to open {path}"))?,
            ))
        }
        None => {
            info!("Reading frames from stdin");
            Box::new(io::stdin().lock())
        }
    };

    let mut app = GestureApp::new(&config)?;
    let stdout = io::stdout();
    let summary = app.run(reader, |gesture| {
        if args.echo {
            let mut out = stdout.lock();
            if writeln!(out, "{gesture}").and_then(|()| out.flush()).is_err() {
                log::warn!("Failed to echo {gesture}");
            }
        }
    })?;

    let metrics = app.shutdown();
    info!(
        "{} gestures detected, {} notifications sent, {} failed, {} suppressed by cooldown",
        summary.gestures(),
        metrics.delivered,
        metrics.failed,
        metrics.suppressed
    );

    Ok(())
}
