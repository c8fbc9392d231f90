//! fa-grab main entry point
//!
//! This is the command-line interface the crawl pipeline launches next to the
//! fetch engine.

use anyhow::Context;
use clap::Parser;
use fa_grab::config::{load_config_with_hash, Config};
use fa_grab::crawler::{classify, read_bounded, serve, GrabHooks};
use fa_grab::output::{build_http_client, upload_username_report, UsernameReport};
use fa_grab::url::CrawlItem;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// fa-grab: crawl-control hooks for archiving a gallery site
///
/// By default fa-grab serves the JSON-lines hook protocol on stdin/stdout for
/// the fetch engine of one crawl item. The other modes inspect or report on
/// an item without crawling.
#[derive(Parser, Debug)]
#[command(name = "fa-grab")]
#[command(version)]
#[command(about = "Crawl-control hooks for archiving a gallery site", long_about = None)]
struct Cli {
    /// Path to TOML policy file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Working directory of the current crawl item
    #[arg(long, env = "item_dir", value_name = "DIR")]
    item_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Serve hook requests on stdin/stdout (default behavior)
    #[arg(long, conflicts_with_all = ["dry_run", "seeds", "classify", "report", "upload"])]
    hooks: bool,

    /// Validate config and print the effective policy
    #[arg(long, conflicts_with_all = ["seeds", "classify", "report", "upload"])]
    dry_run: bool,

    /// Print the seed URLs of a crawl item (e.g. profile:name, submission:1-9)
    #[arg(long, value_name = "ITEM", conflicts_with_all = ["classify", "report", "upload"])]
    seeds: Option<String>,

    /// Print the classifier verdict for a saved document
    #[arg(long, value_name = "FILE", conflicts_with_all = ["report", "upload"])]
    classify: Option<PathBuf>,

    /// Print the username report of the item directory
    #[arg(long, conflicts_with = "upload")]
    report: bool,

    /// Upload the username report of the item directory to the tracker
    #[arg(long)]
    upload: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given; using built-in policy");
            Config::default()
        }
    };

    if cli.dry_run {
        handle_dry_run(&config);
    } else if let Some(item) = &cli.seeds {
        handle_seeds(&config, item)?;
    } else if let Some(path) = &cli.classify {
        handle_classify(&config, path)?;
    } else if cli.report {
        handle_report(require_item_dir(&cli)?)?;
    } else if cli.upload {
        handle_upload(&config, require_item_dir(&cli)?).await?;
    } else {
        handle_hooks(config, require_item_dir(&cli)?)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries hook replies.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("fa_grab=info,warn"),
            1 => EnvFilter::new("fa_grab=debug,info"),
            2 => EnvFilter::new("fa_grab=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn require_item_dir(cli: &Cli) -> anyhow::Result<&Path> {
    let dir = cli
        .item_dir
        .as_deref()
        .context("item directory required (--item-dir or $item_dir)")?;
    anyhow::ensure!(dir.is_dir(), "{} is not a directory", dir.display());
    Ok(dir)
}

/// Handles the --dry-run mode: prints the effective policy
fn handle_dry_run(config: &Config) {
    println!("=== fa-grab Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Primary domains: {}", config.site.primary_domains.join(", "));
    println!("  Mirror domains: {}", config.site.mirror_domains.join(", "));
    println!("  Analytics patterns: {}", config.site.analytics_patterns.len());

    println!("\nSession:");
    println!("  Max total attempts: {}", config.session.max_total_attempts);
    println!(
        "  Max consecutive failures: {}",
        config.session.max_consecutive_failures
    );
    println!("  Backoff: {}s", config.session.backoff_seconds);
    println!("  Document bound: {} bytes", config.session.max_document_bytes);

    println!("\nPolicy:");
    println!(
        "  Reject mirror from favorites: {}",
        config.policy.reject_mirror_from_favorites
    );
    println!(
        "  Force-admit mirror from view: {}",
        config.policy.force_admit_mirror_from_view
    );

    println!("\nTracker:");
    match &config.tracker.url {
        Some(url) => println!(
            "  {} ({})",
            url,
            if config.tracker.private_discovery {
                "private discovery"
            } else {
                "public discovery"
            }
        ),
        None => println!("  (not configured)"),
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the --seeds mode: prints one seed URL per line
fn handle_seeds(config: &Config, item: &str) -> anyhow::Result<()> {
    let item = CrawlItem::parse(item)?;
    let base = Url::parse(&config.site.base_url)?;
    for url in item.seed_urls(&base)? {
        println!("{}", url);
    }
    Ok(())
}

/// Handles the --classify mode: prints what the hooks would decide for a document
fn handle_classify(config: &Config, path: &Path) -> anyhow::Result<()> {
    let text = read_bounded(path, config.session.max_document_bytes)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let verdict = classify(&text, &config.markers);
    println!("not found:       {}", verdict.is_not_found);
    println!(
        "session problem: {}",
        match verdict.session_problem {
            Some(problem) => format!("{:?}", problem),
            None => "none".to_string(),
        }
    );
    println!(
        "usernames:       {}",
        fa_grab::crawler::extract_usernames(&text).count()
    );
    println!(
        "download link:   {}",
        fa_grab::crawler::extract_download_link(&text).unwrap_or("none")
    );
    Ok(())
}

/// Handles the --report mode: prints the username report as JSON
fn handle_report(item_dir: &Path) -> anyhow::Result<()> {
    let report = UsernameReport::load(item_dir)?;
    println!("{}", report.to_json()?);
    Ok(())
}

/// Handles the --upload mode
async fn handle_upload(config: &Config, item_dir: &Path) -> anyhow::Result<()> {
    let report = UsernameReport::load(item_dir)?;
    tracing::info!(
        "Reporting {} discovered and {} disabled usernames",
        report.discovered_usernames.len(),
        report.username_disabled_map.len()
    );

    let client = build_http_client()?;
    upload_username_report(&client, &config.tracker, &report).await?;
    Ok(())
}

/// Handles the hook session for one crawl item
///
/// Any fatal hook error becomes a nonzero exit, which the pipeline treats as
/// a failed item.
fn handle_hooks(config: Config, item_dir: &Path) -> anyhow::Result<()> {
    tracing::info!("Serving hooks for item directory {}", item_dir.display());

    let mut hooks = GrabHooks::new(config, item_dir);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    serve(&mut hooks, stdin.lock(), stdout.lock())?;
    Ok(())
}
