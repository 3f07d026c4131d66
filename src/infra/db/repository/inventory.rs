use super::{DbConn, lock};
use crate::domain::{InventoryRecord, Kpis, NewRecord, PersistenceError, RecordId, Unit};
use chrono::NaiveDate;
use rusqlite::Row;

type Result<T> = std::result::Result<T, PersistenceError>;

const SELECT_COLUMNS: &str = "SELECT id, product, unit, inbound_quantity, inbound_date, outbound_quantity, outbound_date, remaining, note FROM inventory";

/// Repository for stock movement records.
///
/// Records are insert-only: there is no update, an edit is a delete followed by an insert.
pub struct InventoryRepository {
    conn: DbConn,
}

impl InventoryRepository {
    pub fn new(conn: DbConn) -> Self {
        Self { conn }
    }

    /// Persist a movement and return its new id. The product name is not re-validated here.
    pub fn insert(&self, record: &NewRecord) -> Result<RecordId> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO inventory (product, unit, inbound_quantity, inbound_date, outbound_quantity, outbound_date, remaining, note) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                &record.product,
                record.unit.as_str(),
                record.inbound_quantity,
                record.inbound_date,
                record.outbound_quantity,
                record.outbound_date,
                record.remaining(),
                &record.note,
            ],
        )?;
        let id = conn.last_insert_rowid();
        log::debug!("Inserted inventory record {} for '{}'", id, record.product);
        Ok(id)
    }

    /// Records whose product contains `needle`, oldest first. An empty needle matches everything.
    pub fn search(&self, needle: &str) -> Result<Vec<InventoryRecord>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!(
            r"{SELECT_COLUMNS} WHERE product LIKE ?1 ESCAPE '\' ORDER BY id ASC"
        ))?;
        let rows = stmt.query_map([like_pattern(needle)], RawRecord::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_record()?);
        }
        Ok(records)
    }

    pub fn find_all(&self) -> Result<Vec<InventoryRecord>> {
        self.search("")
    }

    pub fn get(&self, id: RecordId) -> Result<Option<InventoryRecord>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            Ok(Some(RawRecord::from_row(row)?.into_record()?))
        } else {
            Ok(None)
        }
    }

    /// Remove a record. Returns `false` when no record had that id.
    pub fn delete(&self, id: RecordId) -> Result<bool> {
        let conn = lock(&self.conn)?;
        let affected = conn.execute("DELETE FROM inventory WHERE id = ?1", [id])?;
        log::debug!("Deleted inventory record {} (rows affected: {})", id, affected);
        Ok(affected > 0)
    }

    pub fn aggregate_kpis(&self) -> Result<Kpis> {
        let conn = lock(&self.conn)?;
        let (record_count, remaining_sum) = conn.query_row(
            "SELECT COUNT(*), SUM(remaining) FROM inventory",
            [],
            |row| Ok((row.get::<_, i64>(0)?, row.get::<_, Option<i64>>(1)?)),
        )?;

        // SUM over zero rows is NULL
        Ok(Kpis {
            record_count,
            total_remaining: remaining_sum.unwrap_or(0),
        })
    }
}

/// Escape LIKE wildcards so the needle is matched literally.
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for ch in needle.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Row as stored, before unit and dates are decoded.
struct RawRecord {
    id: RecordId,
    product: String,
    unit: String,
    inbound_quantity: u32,
    inbound_date: String,
    outbound_quantity: u32,
    outbound_date: String,
    remaining: i64,
    note: String,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            product: row.get(1)?,
            unit: row.get(2)?,
            inbound_quantity: row.get(3)?,
            inbound_date: row.get(4)?,
            outbound_quantity: row.get(5)?,
            outbound_date: row.get(6)?,
            remaining: row.get(7)?,
            note: row.get(8)?,
        })
    }

    fn into_record(self) -> Result<InventoryRecord> {
        let id = self.id;
        let corrupt = |reason: String| PersistenceError::Corrupt { id, reason };

        let unit: Unit = self.unit.parse().map_err(corrupt)?;
        let inbound_date = parse_date(&self.inbound_date)
            .map_err(|e| corrupt(format!("inbound date '{}': {}", self.inbound_date, e)))?;
        let outbound_date = parse_date(&self.outbound_date)
            .map_err(|e| corrupt(format!("outbound date '{}': {}", self.outbound_date, e)))?;

        Ok(InventoryRecord {
            id,
            product: self.product,
            unit,
            inbound_quantity: self.inbound_quantity,
            inbound_date,
            outbound_quantity: self.outbound_quantity,
            outbound_date,
            remaining: self.remaining,
            note: self.note,
        })
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}
