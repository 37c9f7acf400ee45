pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod grading;
pub mod services;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::Path;

use crate::analytics::{TopperComparison, Trend};
use crate::cli::Cli;
use crate::config::{AppConfig, TopperScope};
use crate::database::SemesterStores;
use crate::domain::Semester;
use crate::services::{IngestionService, ReportingService, ServerService};

pub fn interpret() -> Cli {
    Cli::parse()
}

/// Build the runtime configuration from the global CLI options.
pub fn build_config(cli: &Cli) -> AppConfig {
    let config = AppConfig::new().with_data_dir(&cli.data_dir);
    match cli.weighting {
        Some(scheme) => config.with_weighting_scheme(scheme),
        None => config,
    }
}

pub fn handle_serve(config: AppConfig, port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_ingest(
    config: &AppConfig,
    semester: Semester,
    file: &Path,
    subject: Option<&str>,
) -> Result<()> {
    let stores = SemesterStores::open(&config.storage)?;
    let service = IngestionService::new(stores, config.grading.weighting_scheme);
    let report = service.ingest_file(semester, file, subject)?;

    println!(
        "{} semester {}: {} inserted, {} skipped",
        "Ingested".green().bold(),
        semester,
        report.inserted.to_string().green(),
        report.skipped.to_string().yellow()
    );
    Ok(())
}

pub fn handle_toppers(config: &AppConfig, scope: TopperScope) -> Result<()> {
    let stores = SemesterStores::open(&config.storage)?;
    let service = ReportingService::new(stores, config.grading.clone());
    let comparison = service.toppers(scope)?;

    print_toppers(&comparison);
    Ok(())
}

fn print_toppers(comparison: &TopperComparison) {
    println!("{}", comparison.title.bold());
    if comparison.toppers.is_empty() {
        println!("  no records in scope");
        return;
    }

    println!(
        "{:>4}  {:<12} {:<24} {:>8} {:>8} {:>8}",
        "Rank",
        "USN",
        "Name",
        format!("Sem {}", comparison.first_semester),
        format!("Sem {}", comparison.last_semester),
        "Change"
    );
    for entry in &comparison.toppers {
        let first = entry.semesters.first().map_or(0.0, |s| s.percentage);
        let last = entry.semesters.last().map_or(0.0, |s| s.percentage);
        let change = format!("{:>8}", entry.difference_display);
        let change = match entry.comparison {
            Trend::High => change.green(),
            Trend::Low => change.red(),
            Trend::Same => change.normal(),
        };

        println!(
            "{:>4}  {:<12} {:<24} {:>8.2} {:>8.2} {}",
            entry.rank, entry.student_id, entry.student_name, first, last, change
        );
    }
}
