use super::ExportError;
use crate::models::BmiRecord;
use serde::Serialize;
use std::path::Path;

/// Column layout of the history CSV
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Id")]
    id: &'a str,
    #[serde(rename = "Computed_At")]
    computed_at: String,
    #[serde(rename = "Weight_Raw")]
    weight_raw: &'a str,
    #[serde(rename = "Height_Raw")]
    height_raw: &'a str,
    #[serde(rename = "Sex")]
    sex: &'a str,
    #[serde(rename = "BMI")]
    bmi: &'a str,
    #[serde(rename = "Category")]
    category: &'a str,
}

impl<'a> From<&'a BmiRecord> for CsvRow<'a> {
    fn from(record: &'a BmiRecord) -> Self {
        CsvRow {
            id: &record.id,
            computed_at: record.computed_at.to_rfc3339(),
            weight_raw: &record.weight_raw,
            height_raw: &record.height_raw,
            sex: record.sex.as_str(),
            bmi: &record.bmi,
            category: record.category.label(),
        }
    }
}

/// Export history records to CSV, one row per record in history order
pub fn export_records<P: AsRef<Path>>(
    records: &[&BmiRecord],
    output_path: P,
) -> Result<(), ExportError> {
    let file = std::fs::File::create(output_path)?;
    write_records(records, file)
}

/// Write history records as CSV to any writer
pub fn write_records<W: std::io::Write>(records: &[&BmiRecord], writer: W) -> Result<(), ExportError> {
    let mut writer = ::csv::Writer::from_writer(writer);

    for record in records {
        writer
            .serialize(CsvRow::from(*record))
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}
