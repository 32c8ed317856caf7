// Match results dashboard entry point.
//
// Startup sequence:
// 1. Parse command line
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (log to file, not terminal)
// 4. Load the dataset through the cache
// 5. Run the dashboard, or print a one-shot report

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::{Parser, Subcommand};
use placar_core::cache::DatasetCache;
use placar_core::config;
use placar_core::filter::Selection;
use placar_core::view::DashboardView;
use placar_tui::app::App;
use placar_tui::{report, tui};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "placar")]
#[command(about = "Brasileirao match results dashboard", long_about = None)]
struct Cli {
    /// Directory holding config/ and defaults/ (default: current directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// CSV file to load instead of the configured one
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Rows in the top-N tables (overrides dashboard.top_n)
    #[arg(long, global = true)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui,
    /// Print the dashboard view once and exit
    Report {
        /// Restrict to one season (default: all seasons)
        #[arg(long)]
        season: Option<u16>,

        /// Restrict to matches involving one team
        #[arg(long)]
        team: Option<String>,

        /// Also list the selected matches
        #[arg(long)]
        matches: bool,

        /// Emit JSON instead of text tables
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let base_dir = match cli.config_dir {
        Some(ref dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let config = config::load_config(&base_dir).context("failed to load configuration")?;

    init_tracing(&base_dir, &config.logging.filter)?;
    info!("placar starting up, base dir {}", base_dir.display());

    let top_n = cli.top.unwrap_or(config.dashboard.top_n);
    anyhow::ensure!(top_n > 0, "--top must be greater than 0");

    let data_path = match cli.data {
        Some(ref path) => path.clone(),
        None => config.data_path(&base_dir),
    };
    let cache = DatasetCache::new(data_path, config.load_options());
    let dataset = cache
        .get()
        .with_context(|| format!("failed to load dataset from {}", cache.path().display()))?;
    for warning in dataset.warnings() {
        warn!("{}", warning);
    }

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let mut initial = Selection::all();
            initial.season = config.dashboard.initial_season;
            initial.team = config.dashboard.initial_team.clone();

            let mut app = App::new(dataset, top_n, &initial);
            tui::run(&mut app, &cache)?;
            info!("placar shut down cleanly");
        }
        Command::Report {
            season,
            team,
            matches,
            json,
        } => {
            let selection = Selection { season, team };
            let view = DashboardView::build(dataset.records(), &selection, top_n);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                let text = report::render_json(&view, dataset.warnings(), matches)
                    .context("failed to serialize report")?;
                writeln!(out, "{text}")?;
            } else {
                for warning in dataset.warnings() {
                    eprintln!("warning: {warning}");
                }
                report::write_text(&mut out, &view, matches)?;
            }
            out.flush()?;
        }
    }

    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(base_dir: &Path, default_filter: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("placar.log"))
        .context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
