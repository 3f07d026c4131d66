//! Stock movement use-cases: form validation, list ordering and CSV export.

pub mod export;
pub mod form;
pub mod listing;

pub use export::{EXPORT_HEADER, ExportedRow, InventoryExporter};
pub use form::{MAX_QUANTITY, MovementForm};
pub use listing::{SortKey, SortOrder, sort_records};
