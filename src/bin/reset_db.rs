use prostock::infra::app_config;
use rusqlite::Connection;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run()
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = app_config::resolve_database_path(None, &app_config::load_config());

    // Check if database exists
    if !db_path.exists() {
        println!("Database does not exist at: {}", db_path.display());
        println!("No reset needed.");
        return Ok(());
    }

    println!("Connecting to database at: {}", db_path.display());

    let conn = Connection::open(&db_path)?;

    let table_exists: i32 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='inventory'",
        [],
        |row| row.get(0),
    )?;

    if table_exists == 0 {
        println!("Inventory table does not exist. No reset needed.");
        return Ok(());
    }

    let before: i64 = conn.query_row("SELECT COUNT(*) FROM inventory", [], |row| row.get(0))?;
    println!("Current inventory records: {}", before);

    // Rows only; the id sequence is kept so ids are never handed out twice
    conn.execute("DELETE FROM inventory", [])?;

    let after: i64 = conn.query_row("SELECT COUNT(*) FROM inventory", [], |row| row.get(0))?;
    println!("Inventory records after reset: {}", after);

    if after == 0 {
        println!("\nDatabase successfully reset! All records have been deleted.");
    } else {
        eprintln!("\nWarning: Some records still exist in the database.");
    }

    println!("Database location: {}", db_path.display());

    Ok(())
}
