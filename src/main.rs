// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Luotain - API Security Scanner
 * Standalone CLI for OWASP API Security Top 10 (2023) assessment
 *
 * Features:
 * - 10 vulnerability scanner modules
 * - Semaphore-bounded concurrent scanning
 * - JSON and HTML reports
 * - Multi-target support (flags and endpoint files)
 *
 * (c) 2025 Bountyy Oy
 */

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, Level};

use luotain_scanner::config::ScannerConfig;
use luotain_scanner::endpoints::resolve_endpoints;
use luotain_scanner::reporting::ReportEngine;
use luotain_scanner::scanners::ScanEngine;

/// Luotain - OWASP API Security Top 10 Scanner
#[derive(Parser)]
#[command(name = "luotain")]
#[command(author = "Bountyy Oy <info@bountyy.fi>")]
#[command(version = "1.4.0")]
#[command(about = "API security scanner for the OWASP API Top 10 (2023). Fast, modular, Rust.", long_about = None)]
struct Cli {
    /// Target API endpoint URL(s)
    #[arg(short = 'u', long = "url")]
    urls: Vec<String>,

    /// File with list of API endpoints (one per line)
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Number of concurrent scan units
    #[arg(short = 'c', long, default_value_t = 5)]
    concurrency: usize,

    /// Directory for generated reports
    #[arg(short = 'o', long, default_value = "reports")]
    output_dir: PathBuf,

    /// Probe timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Create async runtime
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .thread_name("luotain-scanner")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    print_banner();

    let endpoints = match resolve_endpoints(&cli.urls, cli.file.as_deref()) {
        Ok(endpoints) => endpoints,
        Err(e) => {
            error!("{}", e);
            error!("Provide at least one URL (-u) or a file with URLs (-f).");
            std::process::exit(1);
        }
    };

    let mut config = ScannerConfig::from_env();
    config.max_concurrency = cli.concurrency;
    config.request_timeout_secs = cli.timeout;
    config.reports_dir = cli.output_dir;
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!(
        "Starting scan on {} endpoint(s) with concurrency={}",
        endpoints.len(),
        config.max_concurrency
    );

    let reports_dir = config.reports_dir.clone();
    let engine = ScanEngine::new(config)?;
    let results = engine.execute_scan(&endpoints).await;

    info!(
        "Scan finished in {:.1}s: {} finding(s) across {} unit(s)",
        results.duration_seconds,
        results.findings.len(),
        results.units_executed
    );

    let paths = ReportEngine::new().generate_reports(&results, &reports_dir)?;

    println!("\nScan complete. Reports saved to:");
    println!("- {}", paths.json.display());
    println!("- {}", paths.html.display());

    Ok(())
}

fn print_banner() {
    print!("\x1b[92m");
    println!("   __            __        _");
    println!("  / /_  ______  / /_____ _(_)___");
    println!(" / / / / / __ \\/ __/ __ `/ / __ \\");
    print!("\x1b[91m");
    println!("/ / /_/ / /_/ / /_/ /_/ / / / / /");
    println!("\\_\\__,_/\\____/\\__/\\__,_/_/_/ /_/");
    print!("\x1b[0m");
    println!();
    print!("\x1b[1m\x1b[97m");
    println!("      OWASP API Top 10 Scanner");
    print!("\x1b[0m\x1b[92m");
    println!("       v1.4 - (c) 2025 Bountyy Oy");
    print!("\x1b[0m");
    println!();
}
