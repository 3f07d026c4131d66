use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a stock movement record
pub type RecordId = i64;

/// Unit of measure a product is counted in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Individual pieces
    #[default]
    Unit,
    Kilogram,
    Liter,
    Pack,
    Box,
}

impl Unit {
    pub const ALL: [Unit; 5] = [
        Unit::Unit,
        Unit::Kilogram,
        Unit::Liter,
        Unit::Pack,
        Unit::Box,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Kilogram => "kilogram",
            Self::Liter => "liter",
            Self::Pack => "pack",
            Self::Box => "box",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unit" | "pcs" | "piece" | "adet" => Ok(Self::Unit),
            "kilogram" | "kg" => Ok(Self::Kilogram),
            "liter" | "litre" | "lt" | "l" => Ok(Self::Liter),
            "pack" | "paket" => Ok(Self::Pack),
            "box" | "kutu" => Ok(Self::Box),
            other => Err(format!("unknown unit: {other}")),
        }
    }
}

/// A single stock movement as stored in the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Assigned by the store on insertion, never reused.
    pub id: RecordId,
    /// Free-text product label; duplicates across records are expected.
    pub product: String,
    pub unit: Unit,
    pub inbound_quantity: u32,
    pub inbound_date: NaiveDate,
    pub outbound_quantity: u32,
    pub outbound_date: NaiveDate,
    /// Snapshot of inbound minus outbound taken at insertion time.
    pub remaining: i64,
    /// Optional remark, empty when not given.
    pub note: String,
}

/// Field values for a movement that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub product: String,
    pub unit: Unit,
    pub inbound_quantity: u32,
    pub inbound_date: NaiveDate,
    pub outbound_quantity: u32,
    pub outbound_date: NaiveDate,
    pub note: String,
}

impl NewRecord {
    /// Remaining quantity for this movement alone. Negative when more went out than came in.
    pub fn remaining(&self) -> i64 {
        i64::from(self.inbound_quantity) - i64::from(self.outbound_quantity)
    }
}

/// Summary figures shown above the movement form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Kpis {
    pub record_count: i64,
    pub total_remaining: i64,
}
