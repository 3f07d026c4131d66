//! Plain-text rendering of records and KPIs for the terminal.

use crate::application::inventory::EXPORT_HEADER;
use crate::domain::{InventoryRecord, Kpis};

/// Render records as an aligned table under the export header labels.
pub fn render_table(records: &[InventoryRecord]) -> String {
    let rows: Vec<[String; 9]> = records
        .iter()
        .map(|r| {
            [
                r.id.to_string(),
                r.product.clone(),
                r.unit.to_string(),
                r.inbound_quantity.to_string(),
                r.inbound_date.to_string(),
                r.outbound_quantity.to_string(),
                r.outbound_date.to_string(),
                r.remaining.to_string(),
                r.note.clone(),
            ]
        })
        .collect();

    let mut widths: [usize; 9] = EXPORT_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, EXPORT_HEADER.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 9]) {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

pub fn render_kpis(kpis: &Kpis) -> String {
    format!(
        "Total records:   {}\nTotal remaining: {}\n",
        kpis.record_count, kpis.total_remaining
    )
}
