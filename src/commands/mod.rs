//! Front-end facing commands.
//!
//! Each command runs one user action against the open [`Database`] and
//! returns either a serializable view or a message ready to show the user.

pub mod render;

use crate::application::inventory::{InventoryExporter, MovementForm, SortKey, SortOrder, sort_records};
use crate::domain::{InventoryRecord, Kpis, RecordId, Unit};
use crate::infra::db::Database;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub id: RecordId,
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOutcome {
    pub path: String,
    pub rows: usize,
}

pub fn add_record(
    db: &Database,
    form: MovementForm,
    today: NaiveDate,
    default_unit: Unit,
) -> Result<RecordId, String> {
    let record = form
        .into_new_record(today, default_unit)
        .map_err(|e| e.to_string())?;
    let id = db
        .inventory_repo()
        .insert(&record)
        .map_err(|e| e.to_string())?;
    log::info!(
        "Recorded movement {} for '{}' (remaining {})",
        id,
        record.product,
        record.remaining()
    );
    Ok(id)
}

pub fn list_records(
    db: &Database,
    query: &str,
    sort: SortKey,
    order: SortOrder,
) -> Result<Vec<InventoryRecord>, String> {
    let mut records = db
        .inventory_repo()
        .search(query)
        .map_err(|e| e.to_string())?;
    sort_records(&mut records, sort, order);
    Ok(records)
}

pub fn get_record(db: &Database, id: RecordId) -> Result<InventoryRecord, String> {
    db.inventory_repo()
        .get(id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Record {} not found", id))
}

pub fn delete_record(db: &Database, id: RecordId) -> Result<DeleteOutcome, String> {
    let removed = db
        .inventory_repo()
        .delete(id)
        .map_err(|e| e.to_string())?;
    if removed {
        log::info!("Deleted record {}", id);
    } else {
        log::warn!("Delete requested for unknown record {}", id);
    }
    Ok(DeleteOutcome { id, removed })
}

pub fn get_kpis(db: &Database) -> Result<Kpis, String> {
    db.inventory_repo()
        .aggregate_kpis()
        .map_err(|e| e.to_string())
}

pub fn export_records(db: &Database, path: &Path) -> Result<ExportOutcome, String> {
    let rows = InventoryExporter::export_to_path(&db.inventory_repo(), path)
        .map_err(|e| e.to_string())?;
    Ok(ExportOutcome {
        path: path.to_string_lossy().to_string(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 9).unwrap()
    }

    fn form(product: &str, inbound: &str, outbound: &str) -> MovementForm {
        MovementForm {
            product: product.into(),
            inbound_quantity: inbound.into(),
            outbound_quantity: outbound.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_list_delete_cycle() {
        let db = Database::open_in_memory().unwrap();

        let flour = add_record(&db, form("Flour", "50", ""), today(), Unit::Kilogram).unwrap();
        let sugar = add_record(&db, form("Sugar", "20", "5"), today(), Unit::Kilogram).unwrap();

        let kpis = get_kpis(&db).unwrap();
        assert_eq!((kpis.record_count, kpis.total_remaining), (2, 65));

        let listed = list_records(&db, "", SortKey::Remaining, SortOrder::Ascending).unwrap();
        assert_eq!(listed.iter().map(|r| r.id).collect::<Vec<_>>(), vec![sugar, flour]);

        assert!(delete_record(&db, flour).unwrap().removed);
        assert!(!delete_record(&db, flour).unwrap().removed);
        assert_eq!(get_record(&db, sugar).unwrap().note, "");
        assert_eq!(get_record(&db, flour).unwrap_err(), format!("Record {} not found", flour));
    }

    #[test]
    fn test_invalid_form_is_reported_as_message() {
        let db = Database::open_in_memory().unwrap();
        let err = add_record(&db, form("", "1", ""), today(), Unit::Unit).unwrap_err();
        assert_eq!(err, "Product name cannot be empty");
        assert_eq!(get_kpis(&db).unwrap(), Kpis::default());
    }

    #[test]
    fn test_export_records_reports_row_count() {
        let db = Database::open_in_memory().unwrap();
        add_record(&db, form("Tea", "4", "1"), today(), Unit::Box).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stock.csv");
        let outcome = export_records(&db, &path).unwrap();

        assert_eq!(outcome.rows, 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
