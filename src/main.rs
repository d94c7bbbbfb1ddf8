//! EQueue Kiosk - loads the configuration, resolves every pane address and
//! hands them to a rendering host.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};

use equeue_kiosk::constants::{APP_NAME, DEFAULT_CONFIG_FILE, LOG_FILE_NAME};
use equeue_kiosk::host::{populate, BrowserHost, RenderHost, StdoutHost, TerminalHost};
use equeue_kiosk::layout::{plan_panes, Arrangement, PaneGeometry, PanePlan};
use equeue_kiosk::profile::{default_data_dir, BrowserProfile};

#[derive(Parser, Debug)]
#[command(name = "equeue-kiosk", version, about = "Electronic-queue kiosk shell")]
struct Args {
    /// Configuration file, looked up next to the executable if missing
    #[arg(long, short, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Where panes are rendered
    #[arg(long, value_enum, default_value_t = HostKind::Browser)]
    host: HostKind,
    /// Browser command, overrides the configuration
    #[arg(long)]
    browser: Option<String>,
    /// Debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum HostKind {
    /// One browser window per pane
    Browser,
    /// Layout preview in the terminal
    Terminal,
    /// Print pane addresses and exit
    Print,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _guard = init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("equeue-kiosk: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to a file in the data directory; the terminal host owns the screen
fn init_logging(verbose: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let log_dir = default_data_dir().join(APP_NAME).join("logs");
    let log_dir = if fs::create_dir_all(&log_dir).is_ok() {
        log_dir
    } else {
        PathBuf::from(".")
    };

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .init();
    guard
}

fn run(args: Args) -> Result<()> {
    let config = equeue_kiosk::load(&args.config).context("Failed to load configuration")?;
    let plan = plan_panes(&config).context("Failed to build pane addresses")?;
    let viewport = PaneGeometry::from(&config.window);
    info!(
        mode = %config.mode,
        panes = plan.panes.len(),
        host = ?args.host,
        "Starting"
    );

    match args.host {
        HostKind::Print => {
            let stdout = io::stdout();
            let mut host = StdoutHost::new(stdout.lock());
            launch(&mut host, &plan, viewport)
        }
        HostKind::Terminal => {
            let mut host = TerminalHost::new(config.mode.clone(), plan.arrangement);
            launch(&mut host, &plan, viewport)
        }
        HostKind::Browser => {
            let mut browser = config.browser.clone();
            if let Some(command) = args.browser {
                browser.command = command;
            }
            let profile = BrowserProfile::create(APP_NAME, &default_data_dir())?;
            let kiosk = plan.arrangement == Arrangement::Single;
            let mut host = BrowserHost::new(browser, &profile, kiosk);
            launch(&mut host, &plan, viewport)
        }
    }
}

fn launch(host: &mut dyn RenderHost, plan: &PanePlan, viewport: PaneGeometry) -> Result<()> {
    populate(host, plan, viewport).context("Failed to start panes")?;
    host.wait().context("Rendering host failed")?;
    info!("Shutting down");
    Ok(())
}
