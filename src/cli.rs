//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// CrewFolio - contractor profile and review reports
///
/// Assemble a contractor's profile, flyers, and customer reviews from a
/// marketplace backend and render them as a Markdown or JSON report.
///
/// Examples:
///   crewfolio --contractor c-7f3a
///   crewfolio --contractor c-7f3a --backend-url https://api.example.com
///   crewfolio --contractor c-7f3a --format json --output profile.json
///   crewfolio --contractor c-7f3a --dry-run
///   crewfolio --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Contractor identifier to report on
    ///
    /// Not required when using --init-config.
    #[arg(short, long, value_name = "ID", required_unless_present = "init_config")]
    pub contractor: Option<String>,

    /// Marketplace backend base URL
    ///
    /// Can also be set via CREWFOLIO_BACKEND_URL env var or .crewfolio.toml.
    #[arg(
        short,
        long,
        default_value = "http://localhost:8080",
        env = "CREWFOLIO_BACKEND_URL"
    )]
    pub backend_url: String,

    /// Output file path for the report
    #[arg(short, long, default_value = "crew_profile.md", value_name = "FILE")]
    pub output: PathBuf,

    /// Path to configuration file
    ///
    /// If not specified, looks for .crewfolio.toml in the current directory
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Request timeout in seconds
    ///
    /// How long to wait for each backend request. Default: from config or 30s.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Minimum rating to include in the report
    ///
    /// Reviews below this rating are filtered out of the rendered report.
    #[arg(long, value_name = "RATING")]
    pub min_rating: Option<f64>,

    /// Skip the flyer section
    #[arg(long)]
    pub no_flyers: bool,

    /// Dry run: list qualifying engagements without resolving reviewer profiles
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .crewfolio.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the contractor id, empty if not set (should be validated first).
    pub fn contractor_id(&self) -> &str {
        self.contractor.as_deref().unwrap_or("")
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Validate contractor identifier
        let contractor = self.contractor.as_deref().unwrap_or("");
        if contractor.trim().is_empty() {
            return Err("Contractor identifier must not be empty".to_string());
        }

        // Validate backend URL format
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            return Err("Backend URL must start with 'http://' or 'https://'".to_string());
        }

        // Validate rating filter range
        if let Some(min_rating) = self.min_rating {
            if !(0.0..=5.0).contains(&min_rating) {
                return Err("Minimum rating must be between 0 and 5".to_string());
            }
        }

        // Validate timeout if provided
        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            contractor: Some("c-7f3a".to_string()),
            backend_url: "http://localhost:8080".to_string(),
            output: PathBuf::from("crew_profile.md"),
            config: None,
            format: OutputFormat::Markdown,
            timeout: None,
            min_rating: None,
            no_flyers: false,
            dry_run: false,
            init_config: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_validation_ok() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_contractor() {
        let mut args = make_args();
        args.contractor = Some("   ".to_string());
        assert!(args.validate().is_err());

        args.contractor = None;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_invalid_backend_url() {
        let mut args = make_args();
        args.backend_url = "localhost:8080".to_string();
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_min_rating_range() {
        let mut args = make_args();
        args.min_rating = Some(6.0);
        assert!(args.validate().is_err());

        args.min_rating = Some(3.5);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut args = make_args();
        args.timeout = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_init_config_skips_validation() {
        let mut args = make_args();
        args.contractor = None;
        args.init_config = true;
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
