use crate::history::{summarize, History, HistorySummary};
use crate::models::BmiRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[cfg(feature = "charts")]
pub mod chart;
pub mod csv;
pub mod json;
pub mod text;

/// Export format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Text,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> Result<Self, ExportError> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }

    /// Guess the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| Self::from_str(e).ok())
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Text => "txt",
        }
    }
}

/// Date range filter for exports
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: &NaiveDate) -> bool {
        let after_start = self.start.map_or(true, |start| date >= &start);
        let before_end = self.end.map_or(true, |end| date <= &end);
        after_start && before_end
    }

    /// Filter records by the UTC date they were computed on
    pub fn filter_records<'a>(&self, records: &'a [BmiRecord]) -> Vec<&'a BmiRecord> {
        records
            .iter()
            .filter(|r| self.contains(&r.computed_at.date_naive()))
            .collect()
    }
}

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("History is empty")]
    EmptyHistory,
    #[error("Chart rendering error: {0}")]
    ChartError(String),
}

/// Snapshot of the history written by the JSON and text exporters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryReport {
    pub generated_at: DateTime<Utc>,
    pub date_range: DateRange,
    pub summary: Option<HistorySummary>,
    pub records: Vec<BmiRecord>,
}

impl HistoryReport {
    pub fn build(history: &History, date_range: &DateRange) -> Self {
        let records: Vec<BmiRecord> = date_range
            .filter_records(history.entries())
            .into_iter()
            .cloned()
            .collect();

        HistoryReport {
            generated_at: Utc::now(),
            date_range: date_range.clone(),
            summary: summarize(&records),
            records,
        }
    }
}

/// Main export manager
#[derive(Debug, Clone, Default)]
pub struct ExportManager {
    pub date_range: DateRange,
}

impl ExportManager {
    pub fn new() -> Self {
        ExportManager::default()
    }

    pub fn with_date_range(date_range: DateRange) -> Self {
        ExportManager { date_range }
    }

    /// Write the history in the requested format
    pub fn export<P: AsRef<Path>>(
        &self,
        history: &History,
        format: ExportFormat,
        output_path: P,
    ) -> Result<usize, ExportError> {
        let records = self.date_range.filter_records(history.entries());
        if records.is_empty() {
            return Err(ExportError::EmptyHistory);
        }

        tracing::info!(
            format = ?format,
            records = records.len(),
            path = %output_path.as_ref().display(),
            "exporting history"
        );

        match format {
            ExportFormat::Csv => csv::export_records(&records, output_path)?,
            ExportFormat::Json => json::export_records(&records, output_path)?,
            ExportFormat::Text => {
                text::export_history_report(&HistoryReport::build(history, &self.date_range), output_path)?
            }
        }

        Ok(records.len())
    }
}
