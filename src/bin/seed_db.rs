use chrono::NaiveDate;
use prostock::domain::{NewRecord, Unit};
use prostock::infra::app_config;
use prostock::infra::db::Database;

// (product, unit, inbound, inbound date, outbound, outbound date, note)
const SAMPLES: &[(&str, Unit, u32, &str, u32, &str, &str)] = &[
    ("Flour", Unit::Kilogram, 50, "2024-11-04", 0, "2024-11-04", ""),
    ("Sugar", Unit::Kilogram, 20, "2024-11-04", 5, "2024-11-06", "damaged"),
    ("Sunflower Oil", Unit::Liter, 40, "2024-11-05", 12, "2024-11-08", ""),
    ("Paper Cups", Unit::Pack, 30, "2024-11-05", 30, "2024-11-12", "sold out"),
    ("Tea Bags", Unit::Box, 12, "2024-11-07", 3, "2024-11-09", ""),
    ("Flour", Unit::Kilogram, 25, "2024-11-10", 40, "2024-11-14", "covered from previous stock"),
    ("Mugs", Unit::Unit, 48, "2024-11-11", 6, "2024-11-15", "2 chipped"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = app_config::resolve_database_path(None, &app_config::load_config());
    println!("Connecting to database at: {}", db_path.display());

    let db = Database::open_at(db_path)?;
    {
        let repo = db.inventory_repo();
        for &(product, unit, inbound, inbound_date, outbound, outbound_date, note) in SAMPLES {
            let record = NewRecord {
                product: product.to_string(),
                unit,
                inbound_quantity: inbound,
                inbound_date: NaiveDate::parse_from_str(inbound_date, "%Y-%m-%d")?,
                outbound_quantity: outbound,
                outbound_date: NaiveDate::parse_from_str(outbound_date, "%Y-%m-%d")?,
                note: note.to_string(),
            };
            let id = repo.insert(&record)?;
            println!("Inserted #{}: {} ({} {})", id, product, record.remaining(), unit);
        }

        let kpis = repo.aggregate_kpis()?;
        println!(
            "\nSeeded {} movements. Database now holds {} records, {} remaining in total.",
            SAMPLES.len(),
            kpis.record_count,
            kpis.total_remaining
        );
    }
    db.close()?;

    Ok(())
}
