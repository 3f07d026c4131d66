//! Domain types for ProStock
//! Defines the movement record, its unit of measure, the KPI summary and the error types.

pub mod error;
pub mod record;

pub use error::*;
pub use record::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn test_unit_display_parse() {
        assert_eq!(Unit::Kilogram.to_string(), "kilogram");
        assert_eq!(Unit::from_str("BOX").unwrap(), Unit::Box);
        assert_eq!(Unit::from_str("Kg").unwrap(), Unit::Kilogram);
        assert_eq!(Unit::from_str("paket").unwrap(), Unit::Pack);
        assert!(Unit::from_str("crate").is_err());
    }

    #[test]
    fn test_unit_text_form_round_trips() {
        for unit in Unit::ALL {
            assert_eq!(Unit::from_str(unit.as_str()).unwrap(), unit);
        }
    }

    #[test]
    fn test_new_record_remaining_can_go_negative() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let record = NewRecord {
            product: "Salt".into(),
            unit: Unit::Pack,
            inbound_quantity: 2,
            inbound_date: date,
            outbound_quantity: 7,
            outbound_date: date,
            note: String::new(),
        };
        assert_eq!(record.remaining(), -5);
    }

    #[test]
    fn test_unit_serializes_snake_case() {
        let json = serde_json::to_string(&Unit::Liter).unwrap();
        assert_eq!(json, "\"liter\"");
    }
}
