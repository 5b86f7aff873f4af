//! revlot - Interactive review-coordination dashboard.
//!
//! A tabbed terminal dashboard over the built-in demo workspace: projects,
//! review tasks, experts, annotations, evaluation runs, dataset versions and
//! the tasker queue.
//!
//! Usage:
//!   revlot                    # start on the projects tab
//!   revlot -t ann             # start on the annotations tab
//!   revlot -p 25              # 25 rows per page
//!   revlot --log-file rl.log -v   # debug logs to a file

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use revlot::model::Workspace;
use revlot::tui::{App, Tab};

/// Interactive review-coordination dashboard.
#[derive(Parser)]
#[command(name = "revlot", about = "Expert review dashboard", version)]
struct Args {
    /// Initial tab (PRJ, TSK, EXP, ANN, RUN, VER, QUE).
    #[arg(short, long, default_value = "PRJ")]
    tab: String,

    /// Rows per table page.
    #[arg(short, long, default_value = "10")]
    page_size: usize,

    /// Clock tick interval in milliseconds.
    #[arg(long, default_value = "1000")]
    tick_ms: u64,

    /// Write logs to this file. Without it only errors reach stderr, since
    /// the TUI owns the terminal.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is
    /// info level when logging to a file.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Initializes the tracing subscriber. With a log file, the default level is
/// INFO; on stderr only errors are emitted unless -v is given, so log lines
/// cannot smear the alternate screen.
fn init_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> io::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match (verbose, log_file.is_some()) {
            (0, false) => Level::ERROR,
            (0, true) => Level::INFO,
            (1, _) => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("revlot={}", level).parse().unwrap());

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .with_target(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(false)
                .init();
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    if args.page_size == 0 {
        eprintln!("Error: --page-size must be at least 1");
        std::process::exit(1);
    }

    let Some(tab) = Tab::by_name(&args.tab) else {
        eprintln!("Error: unknown tab '{}'", args.tab);
        eprintln!("Valid tabs: PRJ, TSK, EXP, ANN, RUN, VER, QUE");
        std::process::exit(1);
    };

    if let Err(e) = init_logging(args.verbose, args.quiet, args.log_file.as_deref()) {
        eprintln!("Error opening log file: {}", e);
        std::process::exit(1);
    }

    let app = App::new(Workspace::demo(), tab, args.page_size);
    if let Err(e) = app.run(Duration::from_millis(args.tick_ms.max(100))) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
