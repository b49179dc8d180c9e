use super::{ExportError, HistoryReport};
use std::io::Write;
use std::path::Path;

/// Export a history report to human-readable text format
pub fn export_history_report<P: AsRef<Path>>(
    report: &HistoryReport,
    output_path: P,
) -> Result<(), ExportError> {
    let mut file = std::fs::File::create(output_path)?;
    write_history_report(report, &mut file)
}

/// Write a history report as text to any writer
pub fn write_history_report<W: Write>(report: &HistoryReport, out: &mut W) -> Result<(), ExportError> {
    // Header
    writeln!(out, "{}", "=".repeat(75))?;
    writeln!(out, "BMI HISTORY")?;
    writeln!(out, "{}", "=".repeat(75))?;
    writeln!(out)?;

    writeln!(out, "Generated: {}", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;

    if let Some(start) = report.date_range.start {
        if let Some(end) = report.date_range.end {
            writeln!(out, "Period: {} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))?;
        } else {
            writeln!(out, "Period: From {}", start.format("%Y-%m-%d"))?;
        }
    } else if let Some(end) = report.date_range.end {
        writeln!(out, "Period: Up to {}", end.format("%Y-%m-%d"))?;
    }
    writeln!(out, "Entries: {}", report.records.len())?;
    writeln!(out)?;

    if let Some(summary) = &report.summary {
        writeln!(out, "SUMMARY")?;
        writeln!(out, "{:-<75}", "")?;
        writeln!(out, "Average BMI: {:.2}", summary.mean)?;
        writeln!(out, "Median BMI: {:.2}", summary.median)?;
        writeln!(out, "Range: {:.2} - {:.2}", summary.min, summary.max)?;
        if let Some(std_dev) = summary.std_dev {
            writeln!(out, "Standard Deviation: {:.2}", std_dev)?;
        }
        writeln!(out, "Change Since First Entry: {:+.2}", summary.change)?;
        writeln!(out, "Current Category: {}", summary.latest_category)?;
        for (category, count) in &summary.by_category {
            writeln!(out, "  {:<12} {}", category.label(), count)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "ENTRIES")?;
    writeln!(out, "{:-<75}", "")?;
    writeln!(
        out,
        "{:<20} {:<10} {:<10} {:<8} {:<10} {:<12}",
        "Date", "Weight", "Height", "Sex", "BMI", "Category"
    )?;
    writeln!(out, "{:-<75}", "")?;

    for record in &report.records {
        writeln!(
            out,
            "{:<20} {:<10} {:<10} {:<8} {:<10} {:<12}",
            record.computed_at.format("%Y-%m-%d %H:%M"),
            record.weight_raw,
            record.height_raw,
            record.sex,
            record.bmi,
            record.category
        )?;
    }

    Ok(())
}
