//! Shipstats - productivity analytics for personal project trackers
//!
//! A CLI tool that derives completion rates, ship velocity, estimation
//! accuracy, and chart-ready series from exported project and task records.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad input files, config failure, etc.)

mod analytics;
mod cli;
mod config;
mod models;
mod report;
mod snapshot;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use models::{Report, ReportMetadata};
use snapshot::Snapshot;
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Shipstats v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run_report(args) {
        error!("Report failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .shipstats.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(".shipstats.toml");

    if path.exists() {
        eprintln!("⚠️  .shipstats.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .shipstats.toml")?;

    println!("✅ Created .shipstats.toml with default settings.");
    println!("   Edit it to customize input paths, cadence window, and report sections.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow.
fn run_report(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: Materialize the snapshot
    let projects_path = Path::new(&config.data.projects);
    let tasks_path = Path::new(&config.data.tasks);
    println!(
        "📥 Loading snapshot: {} + {}",
        projects_path.display(),
        tasks_path.display()
    );
    let snapshot = Snapshot::load(projects_path, tasks_path)?;

    // Handle --dry-run: validate the snapshot and exit
    if args.dry_run {
        return handle_dry_run(&snapshot);
    }

    // Step 2: Compute analytics. The reference "now" is resolved here, once;
    // the engine never reads the clock itself.
    let reference = args.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let window = config.analytics.cadence.into();
    let opts = analytics::AnalyticsOptions::new(reference).with_window(window);

    println!("🔢 Computing analytics...");
    println!("   Cadence: {}", opts.window.label());
    println!("   Reference date: {}", reference);

    let metrics = analytics::compute_analytics(&snapshot.projects, &snapshot.tasks, &opts);

    // Step 3: Build the report
    let metadata = ReportMetadata {
        generated_at: Utc::now(),
        reference_date: reference,
        cadence_window: opts.window.label().to_string(),
        projects_total: snapshot.projects.len(),
        tasks_total: snapshot.tasks.len(),
    };
    let full_report = Report { metadata, metrics };

    // Step 4: Generate and save the report
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&full_report)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&full_report, &snapshot, &config.report)
        }
    };

    let output_path = Path::new(&config.general.output);
    std::fs::write(output_path, &output)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    // Print summary
    let m = &full_report.metrics;
    println!("\n📊 Snapshot Summary:");
    println!(
        "   Projects: {} ({} completed, {} active, {} dropped)",
        m.status_counts.started, m.status_counts.completed, m.status_counts.active,
        m.status_counts.dropped
    );
    println!(
        "   Completion rate: {}% | Drop rate: {}% | Avg days to ship: {}d",
        m.completion_rate, m.drop_rate, m.avg_build_time
    );
    println!(
        "   Hours logged: {}h | Est. accuracy: {}% | Gap: {}",
        m.total_hours_logged, m.est_accuracy_percent, m.est_gap_label
    );
    println!(
        "\n✅ Report saved to: {}",
        output_path.display()
    );

    Ok(())
}

/// Handle --dry-run: load the snapshot, print what was found, exit.
fn handle_dry_run(snapshot: &Snapshot) -> Result<()> {
    println!("\n🔍 Dry run: validating snapshot (no report written)...\n");

    println!("   Projects: {}", snapshot.projects.len());
    println!("   Tasks: {}", snapshot.tasks.len());

    let orphaned = snapshot
        .tasks
        .iter()
        .filter(|t| snapshot.project_name(t) == "Unknown Project")
        .count();
    if orphaned > 0 {
        println!("   ⚠️  {} task(s) reference a missing project", orphaned);
    }

    println!("\n✅ Dry run complete. Snapshot is readable.");
    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .shipstats.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
