// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use wp_prefetch::output::display_path;
use wp_prefetch::{
    CommandLineInput, ContentKind, PipelineConfig, PipelineReport,
    SnapshotPipeline, StageOutcome, WordPressClient,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("wp_prefetch.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stdout", Box::new(stdout_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Prints what was written and flags content the build cannot do without.
fn report_completion(config: &PipelineConfig, report: &PipelineReport) {
    println!();
    println!("Snapshot written to {}:", display_path(&config.output_dir));
    for kind in ContentKind::FETCH_ORDER {
        let Some(count) = report.stats.count(kind) else {
            continue;
        };
        let failed = report
            .outcomes
            .iter()
            .any(|outcome| matches!(outcome, StageOutcome::Failed { kind: k, .. } if *k == kind));
        let marker = if failed { "✗" } else { "✓" };
        println!("  {} {:<16} {:>5}", marker, kind.file_name(), count);
    }
    if let Some(files) = &report.media_files {
        let marker = if files.is_success() { "✓" } else { "✗" };
        println!(
            "  {} media files: {} downloaded, {} already present, {} failed ({})",
            marker,
            files.downloaded,
            files.skipped,
            files.failed.len(),
            display_path(&config.images_dir)
        );
    }
    println!(
        "  {} records in {:.1}s",
        report.stats.total(),
        report.stats.duration.as_secs_f64()
    );

    let empty = report.stats.empty_required_kinds();
    if !empty.is_empty() {
        let names: Vec<String> = empty.iter().map(ToString::to_string).collect();
        eprintln!(
            "⚠️  No {} fetched. The site build will be missing content; re-run before building.",
            names.join(", ")
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("could not initialise logging")?;

    let config = PipelineConfig::resolve(cli).context("invalid configuration")?;
    log::info!("Fetching content from {}", config.origin);
    log::debug!("REST: {}  GraphQL: {}", config.rest_base, config.graphql_url);

    let client = WordPressClient::new(&config)?;
    let mut pipeline = SnapshotPipeline::new(client, config.clone());
    let report = pipeline
        .run()
        .await
        .with_context(|| format!("could not write snapshot to {}", config.output_dir.display()))?;

    report_completion(&config, &report);
    Ok(())
}
