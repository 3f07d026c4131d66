use crate::domain::{ExportError, InventoryRecord, RecordId, Unit};
use crate::infra::db::InventoryRepository;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

pub const EXPORT_HEADER: [&str; 9] = [
    "ID",
    "Product",
    "Unit",
    "Inbound",
    "Inbound Date",
    "Outbound",
    "Outbound Date",
    "Remaining",
    "Note",
];

/// One CSV line of an export, fields in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedRow {
    #[serde(rename = "ID")]
    pub id: RecordId,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Unit")]
    pub unit: Unit,
    #[serde(rename = "Inbound")]
    pub inbound_quantity: u32,
    #[serde(rename = "Inbound Date")]
    pub inbound_date: NaiveDate,
    #[serde(rename = "Outbound")]
    pub outbound_quantity: u32,
    #[serde(rename = "Outbound Date")]
    pub outbound_date: NaiveDate,
    #[serde(rename = "Remaining")]
    pub remaining: i64,
    #[serde(rename = "Note")]
    pub note: String,
}

impl From<&InventoryRecord> for ExportedRow {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            id: record.id,
            product: record.product.clone(),
            unit: record.unit,
            inbound_quantity: record.inbound_quantity,
            inbound_date: record.inbound_date,
            outbound_quantity: record.outbound_quantity,
            outbound_date: record.outbound_date,
            remaining: record.remaining,
            note: record.note.clone(),
        }
    }
}

impl From<ExportedRow> for InventoryRecord {
    fn from(row: ExportedRow) -> Self {
        Self {
            id: row.id,
            product: row.product,
            unit: row.unit,
            inbound_quantity: row.inbound_quantity,
            inbound_date: row.inbound_date,
            outbound_quantity: row.outbound_quantity,
            outbound_date: row.outbound_date,
            remaining: row.remaining,
            note: row.note,
        }
    }
}

pub struct InventoryExporter;

impl InventoryExporter {
    /// Write every record, oldest first, as CSV with a header line. Returns the number of data rows.
    pub fn export_all<W: Write>(repo: &InventoryRepository, sink: W) -> Result<usize, ExportError> {
        let records = repo.find_all()?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
        writer.write_record(EXPORT_HEADER)?;
        for record in &records {
            writer.serialize(ExportedRow::from(record))?;
        }
        writer.flush().map_err(ExportError::Flush)?;

        Ok(records.len())
    }

    /// Create or truncate `path` and export into it.
    pub fn export_to_path(repo: &InventoryRepository, path: &Path) -> Result<usize, ExportError> {
        let file = std::fs::File::create(path).map_err(|source| ExportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let count = Self::export_all(repo, std::io::BufWriter::new(file))?;
        log::info!("Exported {} records to {}", count, path.display());
        Ok(count)
    }

    /// Parse an export back into rows, reading fields by position.
    pub fn read_exported<R: Read>(source: R) -> Result<Vec<ExportedRow>, ExportError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(source);

        let headers = reader.headers().map_err(read_error)?;
        if headers.iter().ne(EXPORT_HEADER) {
            return Err(ExportError::Malformed(format!(
                "unexpected header: {}",
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(read_error)?;
            let row: ExportedRow = record
                .deserialize(None)
                .map_err(|e| ExportError::Malformed(format!("row {}: {}", line + 1, e)))?;
            rows.push(row);
        }
        Ok(rows)
    }
}

/// I/O failures of the source are read errors; anything else means the data is bad.
fn read_error(err: csv::Error) -> ExportError {
    if matches!(err.kind(), csv::ErrorKind::Io(_)) {
        ExportError::Read(err)
    } else {
        ExportError::Malformed(err.to_string())
    }
}
