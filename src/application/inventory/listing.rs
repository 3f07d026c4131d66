use crate::domain::InventoryRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Column the inventory list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    Product,
    Unit,
    Inbound,
    InboundDate,
    Outbound,
    OutboundDate,
    Remaining,
    Note,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => write!(f, "id"),
            Self::Product => write!(f, "product"),
            Self::Unit => write!(f, "unit"),
            Self::Inbound => write!(f, "inbound"),
            Self::InboundDate => write!(f, "inbound_date"),
            Self::Outbound => write!(f, "outbound"),
            Self::OutboundDate => write!(f, "outbound_date"),
            Self::Remaining => write!(f, "remaining"),
            Self::Note => write!(f, "note"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "id" => Ok(Self::Id),
            "product" => Ok(Self::Product),
            "unit" => Ok(Self::Unit),
            "inbound" => Ok(Self::Inbound),
            "inbound_date" => Ok(Self::InboundDate),
            "outbound" => Ok(Self::Outbound),
            "outbound_date" => Ok(Self::OutboundDate),
            "remaining" => Ok(Self::Remaining),
            "note" => Ok(Self::Note),
            other => Err(format!("unknown sort column: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

fn compare(a: &InventoryRecord, b: &InventoryRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Product => a.product.to_lowercase().cmp(&b.product.to_lowercase()),
        SortKey::Unit => a.unit.cmp(&b.unit),
        SortKey::Inbound => a.inbound_quantity.cmp(&b.inbound_quantity),
        SortKey::InboundDate => a.inbound_date.cmp(&b.inbound_date),
        SortKey::Outbound => a.outbound_quantity.cmp(&b.outbound_quantity),
        SortKey::OutboundDate => a.outbound_date.cmp(&b.outbound_date),
        SortKey::Remaining => a.remaining.cmp(&b.remaining),
        SortKey::Note => a.note.to_lowercase().cmp(&b.note.to_lowercase()),
    }
}

/// Sort a search result in place. Equal keys stay in id order.
pub fn sort_records(records: &mut [InventoryRecord], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let primary = match order {
            SortOrder::Ascending => compare(a, b, key),
            SortOrder::Descending => compare(b, a, key),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Unit;
    use chrono::NaiveDate;

    fn record(id: i64, product: &str, remaining: i64) -> InventoryRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        InventoryRecord {
            id,
            product: product.into(),
            unit: Unit::Unit,
            inbound_quantity: remaining.max(0) as u32,
            inbound_date: date,
            outbound_quantity: 0,
            outbound_date: date,
            remaining,
            note: String::new(),
        }
    }

    fn ids(records: &[InventoryRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_sort_by_remaining_descending() {
        let mut rows = vec![record(1, "a", 3), record(2, "b", -4), record(3, "c", 9)];
        sort_records(&mut rows, SortKey::Remaining, SortOrder::Descending);
        assert_eq!(ids(&rows), vec![3, 1, 2]);
    }

    #[test]
    fn test_product_sort_ignores_case_and_keeps_id_order_on_ties() {
        let mut rows = vec![
            record(4, "sugar", 1),
            record(1, "Flour", 1),
            record(2, "Sugar", 1),
        ];
        sort_records(&mut rows, SortKey::Product, SortOrder::Ascending);
        assert_eq!(ids(&rows), vec![1, 2, 4]);

        sort_records(&mut rows, SortKey::Product, SortOrder::Descending);
        assert_eq!(ids(&rows), vec![2, 4, 1]);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!(SortKey::from_str("inbound-date").unwrap(), SortKey::InboundDate);
        assert_eq!(SortKey::Remaining.to_string(), "remaining");
        assert!(SortKey::from_str("price").is_err());
    }
}
