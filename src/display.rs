//! Terminal rendering of results and history
//!
//! Colors follow the category palette; callers disable them globally through
//! `colored::control::set_override` when output is not a terminal.

use crate::gauge::{bar_cells, render_plain, GaugeCell, SCALE_LEGEND};
use crate::history::{History, HistorySummary};
use crate::models::{BmiOutcome, BmiRecord, Category};
use crate::session::ResultView;
use colored::*;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// One row of the history table
#[derive(Debug, Tabled)]
pub struct HistoryRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Weight (kg)")]
    pub weight: String,
    #[tabled(rename = "Height")]
    pub height: String,
    #[tabled(rename = "Sex")]
    pub sex: String,
    #[tabled(rename = "BMI")]
    pub bmi: String,
    #[tabled(rename = "Category")]
    pub category: String,
}

impl HistoryRow {
    pub fn from_record(index: usize, record: &BmiRecord, date_format: &str) -> Self {
        HistoryRow {
            index,
            date: record.computed_at.format(date_format).to_string(),
            weight: record.weight_raw.clone(),
            height: record.height_raw.clone(),
            sex: record.sex.to_string(),
            bmi: record.bmi.clone(),
            category: record.category.to_string(),
        }
    }
}

/// Category label in its display color
pub fn paint_category(category: Category) -> ColoredString {
    let (r, g, b) = category.color_rgb();
    category.label().truecolor(r, g, b).bold()
}

/// Colored gauge bar with the marker at `position`
///
/// Falls back to band letters when colors are off.
pub fn render_gauge(position: f64, width: usize) -> String {
    if !colored::control::SHOULD_COLORIZE.should_colorize() {
        return render_plain(position, width);
    }

    let mut bar = String::new();
    for cell in bar_cells(position, width) {
        let painted = match cell {
            GaugeCell::Marker => "|".bold().to_string(),
            GaugeCell::Band(category) => {
                let (r, g, b) = category.color_rgb();
                "=".truecolor(r, g, b).to_string()
            }
        };
        bar.push_str(&painted);
    }
    bar
}

/// Result box: the outcome, a validation message, or the placeholder
pub fn render_result(view: &ResultView<'_>, gauge_width: usize) -> String {
    match view {
        ResultView::Placeholder => "Enter your data to calculate".dimmed().to_string(),
        ResultView::Error(message) => message.red().bold().to_string(),
        ResultView::Result(outcome) => render_outcome(outcome, gauge_width),
    }
}

pub fn render_outcome(outcome: &BmiOutcome, gauge_width: usize) -> String {
    format!(
        "{} {}\n{} {}\n{}\n{}",
        "Your BMI is:".bold(),
        outcome.bmi_display.bold(),
        "Category:".bold(),
        paint_category(outcome.category),
        render_gauge(outcome.gauge_position, gauge_width),
        SCALE_LEGEND.dimmed()
    )
}

/// History as a table, oldest first
pub fn render_history(history: &History, date_format: &str) -> String {
    if history.is_empty() {
        return "No entries yet".dimmed().to_string();
    }

    let rows: Vec<HistoryRow> = history
        .iter()
        .enumerate()
        .map(|(i, record)| HistoryRow::from_record(i + 1, record, date_format))
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn render_summary(summary: &HistorySummary) -> String {
    let mut lines = vec![
        format!("{} {}", "Entries:".bold(), summary.count),
        format!("{} {:.2}", "Average BMI:".bold(), summary.mean),
        format!("{} {:.2}", "Median BMI:".bold(), summary.median),
        format!("{} {:.2} - {:.2}", "Range:".bold(), summary.min, summary.max),
    ];
    if let Some(std_dev) = summary.std_dev {
        lines.push(format!("{} {:.2}", "Std deviation:".bold(), std_dev));
    }
    lines.push(format!("{} {:+.2}", "Change:".bold(), summary.change));
    lines.push(format!("{} {}", "Current category:".bold(), paint_category(summary.latest_category)));
    lines.join("\n")
}
