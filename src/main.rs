//! CrewFolio - Contractor Profile & Review Reports
//!
//! A CLI tool that assembles a contractor's profile, flyers, and customer
//! reviews from a marketplace backend and renders a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, missing profile, etc.)

mod backend;
mod cli;
mod config;
mod models;
mod profile;
mod report;
mod reviews;

use anyhow::{Context, Result};
use backend::{EngagementFilter, EngagementStore, HttpBackend, HttpBackendConfig};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use indicatif::{ProgressBar, ProgressStyle};
use models::{ProfileReport, RatingSummary, ReportMetadata};
use reviews::ReviewAggregator;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    info!("CrewFolio v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Build the report
    if let Err(e) = run_report(args).await {
        error!("Report failed: {}", e);
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .crewfolio.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".crewfolio.toml");

    if path.exists() {
        eprintln!("⚠️  .crewfolio.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .crewfolio.toml")?;

    println!("✅ Created .crewfolio.toml with default settings.");
    println!("   Edit it to customize the backend URL, timeout, and report sections.");
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
async fn run_report(args: Args) -> Result<()> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let contractor_id = args.contractor_id().to_string();

    // Step 1: Connect to the backend
    println!("🔌 Backend: {}", config.backend.base_url);
    let backend = Arc::new(HttpBackend::new(HttpBackendConfig {
        base_url: config.backend.base_url.clone(),
        timeout_seconds: config.backend.timeout_seconds,
    }));

    // Handle --dry-run: list engagements and exit
    if args.dry_run {
        return handle_dry_run(backend.as_ref(), &contractor_id).await;
    }

    // Step 2: Load the subject's profile
    println!("👷 Fetching contractor profile: {}", contractor_id);
    let contractor = profile::load_contractor(backend.as_ref(), &contractor_id).await?;
    println!("   {}", contractor.name);
    println!("   {}", contractor.headline());

    // Step 3: Aggregate reviews
    println!("\n⭐ Aggregating reviews...");
    let spinner = make_spinner(!args.quiet);
    let aggregator = ReviewAggregator::new(backend.clone(), backend.clone());
    let mut reviews = aggregator.aggregate(&contractor_id).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    println!("   {} reviews with feedback", reviews.len());

    // Apply the rating filter to the rendered report only
    if let Some(min_rating) = config.report.min_rating {
        let before = reviews.len();
        reviews.retain(|review| review.rating >= min_rating);
        if reviews.len() < before {
            info!(
                "Filtered {} reviews below rating {:.1}",
                before - reviews.len(),
                min_rating
            );
        }
    }

    // Step 4: Load flyers (best-effort)
    let flyers = if config.report.include_flyers {
        profile::load_flyers(backend.as_ref(), &contractor_id).await
    } else {
        Vec::new()
    };

    // Step 5: Build the report
    println!("\n📝 Generating report...");

    let duration = start_time.elapsed().as_secs_f64();
    let rating = RatingSummary::from_reviews(&reviews);

    let metadata = ReportMetadata {
        contractor_id: contractor_id.clone(),
        backend_url: config.backend.base_url.clone(),
        generated_at: Utc::now(),
        reviews_total: reviews.len(),
        flyers_total: flyers.len(),
        duration_seconds: duration,
    };

    let profile_report = ProfileReport {
        metadata,
        contractor,
        rating,
        reviews,
        flyers,
    };

    // Step 6: Render and save the report
    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&profile_report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&profile_report),
    };

    std::fs::write(&args.output, &output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    // Print summary
    println!("\n📊 Profile Summary:");
    println!(
        "   Reviews: {} (average {:.1})",
        profile_report.rating.total, profile_report.rating.average
    );
    if profile_report.flyers.is_empty() {
        debug!("No flyers in report");
    } else {
        println!("   Flyers: {}", profile_report.flyers.len());
    }
    println!("   Duration: {:.1}s", duration);
    println!(
        "\n✅ Report complete! Saved to: {}",
        args.output.display()
    );

    Ok(())
}

/// Handle --dry-run: list completed engagements, no profile lookups, exit.
async fn handle_dry_run(store: &dyn EngagementStore, contractor_id: &str) -> Result<()> {
    println!("\n🔍 Dry run: listing completed engagements (no profile lookups)...\n");

    let filter = EngagementFilter::completed_for(contractor_id);
    let engagements = store
        .query_engagements(&filter)
        .await
        .context("Failed to query engagements")?;

    if engagements.is_empty() {
        println!("   No completed engagements found.");
    } else {
        for engagement in &engagements {
            let marker = if engagement.has_feedback() {
                "📝"
            } else {
                "  "
            };
            println!(
                "     {} {} (rating {:.1})",
                marker, engagement.id, engagement.rating
            );
        }

        let with_feedback = engagements.iter().filter(|e| e.has_feedback()).count();
        println!(
            "\n   Total: {} engagements, {} with feedback",
            engagements.len(),
            with_feedback
        );
    }

    println!("\n✅ Dry run complete. No reviewer profiles were resolved.");
    Ok(())
}

/// Spinner shown while reviewer profiles resolve.
fn make_spinner(show: bool) -> Option<ProgressBar> {
    if !show {
        return None;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Resolving reviewer profiles...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
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
            info!("Loaded default config from .crewfolio.toml");
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
