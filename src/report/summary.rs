//! Import summary report

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::import::{BatchReport, ImportOutcome};

/// Build the summary table for a directory import
pub fn summary_table(report: &BatchReport) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("📂 Databases Attempted"),
        Cell::new(report.attempted()),
    ]);

    table.add_row(vec![
        Cell::new("✅ Imported"),
        Cell::new(report.succeeded())
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);

    table.add_row(vec![
        Cell::new("⚠️  Failed"),
        Cell::new(report.failed()).fg(if report.failed() == 0 {
            Color::White
        } else {
            Color::Red
        }),
    ]);

    table.add_row(vec![
        Cell::new("📋 Records Added"),
        Cell::new(report.records()).fg(Color::Cyan),
    ]);

    table
}

/// Print the summary of a directory import
pub fn display_batch_summary(report: &BatchReport) {
    println!();
    println!(
        "    {} {}",
        style("📋").cyan(),
        style("IMPORT SUMMARY").white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
    println!();

    // Indent the table
    for line in summary_table(report).to_string().lines() {
        println!("    {}", line);
    }

    if report.failed() > 0 {
        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("FAILED DATABASES").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();
        for outcome in report.failures() {
            if let ImportOutcome::Failure { reason, .. } = outcome {
                println!(
                    "      {} {} {}",
                    style("•").dim(),
                    style(outcome.display_name()).yellow(),
                    style(reason).dim()
                );
            }
        }
    }
    println!();
}
