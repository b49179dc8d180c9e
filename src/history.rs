//! In-memory computation history
//!
//! Records are appended in call order and never edited or removed. The list
//! lives only as long as its owner; nothing is written to disk unless the
//! caller exports it.

use crate::models::{BmiOutcome, BmiRecord, Category, SexAdjustment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Distribution, Max, Median, Min};
use std::collections::BTreeMap;

/// Append-only, insertion-ordered list of BMI records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    records: Vec<BmiRecord>,
}

/// One point of the BMI-over-time chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub computed_at: DateTime<Utc>,
    pub label: String,
    pub bmi: f64,
    pub category: Category,
}

/// Aggregate view of the finite BMI values in a history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation, `None` with fewer than two values
    pub std_dev: Option<f64>,
    /// Change from the first to the latest value
    pub change: f64,
    pub latest_category: Category,
    pub by_category: BTreeMap<Category, usize>,
}

impl History {
    pub fn new() -> Self {
        History::default()
    }

    /// Append a record built from a successful computation, stamped now
    pub fn record(
        &mut self,
        weight_raw: &str,
        height_raw: &str,
        sex: SexAdjustment,
        outcome: &BmiOutcome,
    ) -> &BmiRecord {
        self.record_at(weight_raw, height_raw, sex, outcome, Utc::now())
    }

    /// Append a record with an explicit timestamp
    pub fn record_at(
        &mut self,
        weight_raw: &str,
        height_raw: &str,
        sex: SexAdjustment,
        outcome: &BmiOutcome,
        computed_at: DateTime<Utc>,
    ) -> &BmiRecord {
        let record = BmiRecord {
            id: uuid::Uuid::new_v4().to_string(),
            weight_raw: weight_raw.to_string(),
            height_raw: height_raw.to_string(),
            sex,
            bmi: outcome.bmi_display.clone(),
            category: outcome.category,
            computed_at,
        };
        tracing::debug!(id = %record.id, bmi = %record.bmi, total = self.records.len() + 1, "history entry added");

        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    pub fn entries(&self) -> &[BmiRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BmiRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&BmiRecord> {
        self.records.last()
    }

    pub fn get(&self, id: &str) -> Option<&BmiRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Points for the BMI line chart, one per record, labelled by date
    pub fn chart_series(&self, date_format: &str) -> Vec<ChartPoint> {
        self.records
            .iter()
            .map(|r| ChartPoint {
                computed_at: r.computed_at,
                label: r.computed_at.format(date_format).to_string(),
                bmi: r.bmi_value(),
                category: r.category,
            })
            .collect()
    }

    /// Summary statistics over finite BMI values
    pub fn summary(&self) -> Option<HistorySummary> {
        summarize(&self.records)
    }
}

/// Summary statistics for any run of records, in order
pub fn summarize<'a, I>(records: I) -> Option<HistorySummary>
where
    I: IntoIterator<Item = &'a BmiRecord>,
{
    let mut values = Vec::new();
    let mut by_category = BTreeMap::new();
    let mut latest_category = None;

    for record in records {
        let value = record.bmi_value();
        if value.is_finite() {
            values.push(value);
        }
        *by_category.entry(record.category).or_insert(0) += 1;
        latest_category = Some(record.category);
    }

    let first = *values.first()?;
    let last = *values.last()?;
    let latest_category = latest_category?;

    let count = values.len();
    let data = Data::new(values);
    let std_dev = if count >= 2 { data.std_dev() } else { None };

    Some(HistorySummary {
        count,
        mean: data.mean()?,
        median: data.median(),
        min: data.min(),
        max: data.max(),
        std_dev,
        change: last - first,
        latest_category,
        by_category,
    })
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a BmiRecord;
    type IntoIter = std::slice::Iter<'a, BmiRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
