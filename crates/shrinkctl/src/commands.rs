//! Subcommand implementations for shrinkctl

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use shrink_common::export::ExportDocument;
use shrink_common::record::RiskLevel;
use shrink_common::{recommend, risk, ShrinkConfig, COMMON_PATTERNS};
use std::fs;
use std::path::Path;

/// Run the investigation wizard TUI
pub async fn investigate() -> Result<()> {
    let config = ShrinkConfig::load().unwrap_or_default();
    crate::tui::run(config).await
}

/// Print the fixed pattern catalog
pub fn patterns() -> Result<()> {
    println!("{}", "Pattern catalog".bold());
    println!();
    for info in COMMON_PATTERNS {
        println!("  {:<20} {}", info.tag.as_str().cyan(), info.title.bold());
        println!("  {:<20} {}", "", info.description.dimmed());
    }
    Ok(())
}

/// Re-score an exported investigation and print the breakdown
pub fn score(file: &Path) -> Result<()> {
    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document: ExportDocument = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let breakdown = risk::score_breakdown(&document.record);
    let suggested = risk::suggested_level(&document.record);

    println!("{}", format!("Investigation {}", document.case_id).bold());
    println!("  Store:            {}", document.record.basic_info.store_number);
    println!("  Exported:         {}", document.timestamp);
    println!("  Total time:       {}s", document.total_seconds);
    println!();
    println!("  Amount factor:    +{}", breakdown.amount);
    println!("  Pattern factor:   +{}", breakdown.patterns);
    println!("  Root cause:       +{}", breakdown.root_cause);
    println!(
        "  Risk score:       {}/{}",
        breakdown.total,
        risk::MAX_SCORE
    );

    let level_label = suggested.as_str().to_uppercase();
    let level_line = match suggested {
        RiskLevel::High => level_label.red().to_string(),
        RiskLevel::Medium => level_label.yellow().to_string(),
        RiskLevel::Low => level_label.green().to_string(),
    };
    println!("  Suggested level:  {}", level_line);
    println!(
        "  Recorded level:   {}",
        document.record.resolution.risk_level.as_str().to_uppercase()
    );

    let advice = recommend::recommendations(&document.record);
    if !advice.is_empty() {
        println!();
        println!("{}", "Recommendations".bold());
        for line in advice {
            println!("  - {line}");
        }
    }

    Ok(())
}
