use crate::domain::{FormError, NewRecord, Unit};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Largest quantity the movement form accepts.
pub const MAX_QUANTITY: u32 = 999_999;

/// Movement form contents exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementForm {
    pub product: String,
    pub unit: String,
    pub inbound_quantity: String,
    pub inbound_date: String,
    pub outbound_quantity: String,
    pub outbound_date: String,
    pub note: String,
}

impl MovementForm {
    /// Validate the form. Blank quantities count as 0, blank dates as `today`,
    /// and a blank unit falls back to `default_unit`.
    pub fn into_new_record(self, today: NaiveDate, default_unit: Unit) -> Result<NewRecord, FormError> {
        let product = self.product.trim();
        if product.is_empty() {
            return Err(FormError::EmptyProduct);
        }

        let unit = if self.unit.trim().is_empty() {
            default_unit
        } else {
            self.unit
                .parse()
                .map_err(|_| FormError::InvalidUnit(self.unit.clone()))?
        };

        Ok(NewRecord {
            product: product.to_string(),
            unit,
            inbound_quantity: parse_quantity("inbound", &self.inbound_quantity)?,
            inbound_date: parse_date("inbound", &self.inbound_date, today)?,
            outbound_quantity: parse_quantity("outbound", &self.outbound_quantity)?,
            outbound_date: parse_date("outbound", &self.outbound_date, today)?,
            note: self.note,
        })
    }
}

fn parse_quantity(field: &'static str, raw: &str) -> Result<u32, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    match raw.parse::<u32>() {
        Ok(value) if value <= MAX_QUANTITY => Ok(value),
        _ => Err(FormError::InvalidQuantity {
            field,
            value: raw.to_string(),
            max: MAX_QUANTITY,
        }),
    }
}

fn parse_date(field: &'static str, raw: &str, today: NaiveDate) -> Result<NaiveDate, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| FormError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}
