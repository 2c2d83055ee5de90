//! Convenience helpers shared across command handlers.

use anyhow::{Context, Result};
use card_placeholders::catalog::ScryfallClient;
use card_placeholders::pipeline::RunReport;
use card_placeholders::{CardSummary, CatalogStatus};

use crate::cli::common::CatalogArgs;

/// Build the catalog client from command-line flags.
pub fn build_client(args: &CatalogArgs) -> Result<ScryfallClient> {
    let client = ScryfallClient::with_base_url(args.catalog_url.as_str())
        .with_context(|| format!("failed to create catalog client for {}", args.catalog_url))?;
    Ok(client.with_request_delay(args.request_delay()))
}

/// Human-readable, multi-line description of one card summary.
pub fn format_summary(summary: &CardSummary) -> String {
    let status = match &summary.status {
        CatalogStatus::Found => "found".to_string(),
        CatalogStatus::Unknown => "no catalog data".to_string(),
        CatalogStatus::LookupFailed { reason } => format!("lookup failed: {}", reason),
    };
    let sets: Vec<String> = summary.chosen_sets.iter().map(ToString::to_string).collect();
    let mut out = format!("{} [{}, {:?}]\n", summary.name, status, summary.branch);
    out.push_str(&format!("  Color: {}\n", summary.color_label));
    if sets.is_empty() {
        out.push_str("  Sets:  (none)\n");
    } else {
        out.push_str(&format!("  Sets:  {}\n", sets.join(" ")));
    }
    out
}

/// Print the run summary, listing degraded cards.
pub fn print_report(report: &RunReport) {
    println!(
        "Rendered {} placeholder(s) on {} page(s) to {}",
        report.cards,
        report.pages,
        report.output.display()
    );
    if !report.unknown.is_empty() {
        println!("No catalog data for {} card(s):", report.unknown.len());
        for name in &report.unknown {
            println!("  - {}", name);
        }
    }
    if !report.failed.is_empty() {
        println!("Catalog lookup failed for {} card(s):", report.failed.len());
        for failure in &report.failed {
            println!("  - {}: {}", failure.name, failure.reason);
        }
    }
}
