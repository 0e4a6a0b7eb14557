//! Run command handler

use anyhow::Result;
use colored::*;
use prowl_core::domain::report::IndexerReport;
use prowl_setup::{Config, SetupSummary, run_from_config};

/// Run every setup stage and print what happened
pub async fn handle_run(config: &Config) -> Result<()> {
    println!(
        "{} {}",
        "Configuring".bold(),
        config.target_url.cyan()
    );

    let summary = match run_from_config(config).await {
        Ok(summary) => summary,
        Err(e) => {
            println!("{} {}", "✗ Setup aborted:".red().bold(), e);
            return Err(e.into());
        }
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &SetupSummary) {
    println!(
        "  Ready after {} probe(s) ({:.1}s)",
        summary.ready.attempts,
        summary.ready.waited.as_secs_f64()
    );
    match summary.tag_id {
        Some(id) => println!("  Tag id:     {}", id.to_string().bold()),
        None => println!("  Tag id:     {}", "unknown".dimmed()),
    }
    println!();

    for indexer in &summary.report.indexers {
        print_indexer(indexer);
    }
    println!();

    let with_failures = summary.report.indexers_with_failures();
    if with_failures == 0 {
        println!("{}", "✓ Setup complete".green().bold());
    } else {
        println!(
            "{}",
            format!(
                "✓ Setup complete ({} of {} indexer(s) had failed calls)",
                with_failures,
                summary.report.indexers.len()
            )
            .yellow()
            .bold()
        );
    }
}

fn print_indexer(indexer: &IndexerReport) {
    let marker = if indexer.failed() == 0 {
        "✓".green()
    } else {
        "✗".red()
    };

    let calls: Vec<String> = indexer
        .calls
        .iter()
        .map(|call| {
            let status = call
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unreachable".to_string());
            format!("{} {}", call.site, status)
        })
        .collect();

    println!(
        "  {} {} {} {}",
        marker,
        indexer.name.bold(),
        format!("[{}]", indexer.branch).dimmed(),
        calls.join(", ")
    );
}
