use anyhow::Result;
use colored::*;
use records_core::{ValidationFailure, ValidationOutcome, ValidationReport, Violation};
use serde_json::json;

pub fn print_validation_report(report: &ValidationReport, format: &str, all: bool) -> Result<()> {
    match format {
        "json" => print_json_report(report, all),
        _ => {
            print_text_report(report, all);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport, all: bool) {
    println!("\n{}", "═".repeat(60));
    println!("{}", format!("  VALIDATION REPORT: {}", report.record_type).bold());
    println!("{}", "═".repeat(60));

    for (i, outcome) in report.outcomes.iter().enumerate() {
        match outcome {
            Ok(record) => {
                println!("\n{} {}", format!("Record {}:", i + 1).bold(), "valid".green());
                println!("  {}", record);
            }
            Err(failure) => {
                println!("\n{} {}", format!("Record {}:", i + 1).bold(), "invalid".red());
                for line in reported(failure, all).to_string().lines() {
                    println!("  {}", line.red());
                }
            }
        }
    }

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    let stats = &report.stats;
    println!("\n{}", "Summary:".bold());
    println!("  Records validated: {}", stats.records_validated);
    println!("  Records passed:    {}", stats.records_passed);
    println!("  Records failed:    {}", stats.records_failed);
    println!("  Total violations:  {}", stats.violations);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport, all: bool) -> Result<()> {
    let records: Vec<_> = report
        .outcomes
        .iter()
        .enumerate()
        .map(|(index, outcome)| outcome_json(index, outcome, all))
        .collect();

    let output = json!({
        "record_type": report.record_type,
        "passed": report.passed,
        "records": records,
        "summary": {
            "records_validated": report.stats.records_validated,
            "records_passed": report.stats.records_passed,
            "records_failed": report.stats.records_failed,
            "violation_count": report.stats.violations,
            "duration_ms": report.stats.duration_ms,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn outcome_json(index: usize, outcome: &ValidationOutcome, all: bool) -> serde_json::Value {
    match outcome {
        Ok(record) => json!({
            "index": index,
            "valid": true,
            "record": record.to_raw(),
        }),
        Err(failure) => json!({
            "index": index,
            "valid": false,
            "violations": reported(failure, all).violations(),
        }),
    }
}

/// The failure as shown to the user: complete with `--all`, otherwise
/// trimmed to its first violation.
fn reported(failure: &ValidationFailure, all: bool) -> ValidationFailure {
    if all {
        return failure.clone();
    }
    let first: Vec<Violation> = failure.first().cloned().into_iter().collect();
    ValidationFailure::new(failure.record_type(), first)
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
