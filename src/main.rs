//! ProStock CLI entry point.
//!
//! Records stock movements, lists and searches them, shows KPIs and exports CSV.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use prostock::application::inventory::{MovementForm, SortKey, SortOrder};
use prostock::commands::{self, render};
use prostock::domain::{PersistenceError, RecordId, Unit};
use prostock::infra::app_config::{self, AppConfig};
use prostock::infra::db::Database;

#[derive(Parser, Debug)]
#[command(name = "prostock")]
#[command(version)]
#[command(about = "Track stock inbound and outbound movements", long_about = None)]
struct Args {
    /// Database file to use instead of the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(flatten)]
    Inventory(InventoryCommand),

    /// Show or update the configuration file
    Config {
        /// Database file to use by default
        #[arg(long)]
        database: Option<PathBuf>,
        /// Unit used when a movement is added without one
        #[arg(long)]
        default_unit: Option<Unit>,
    },
}

/// Commands that work on the open database.
#[derive(Subcommand, Debug)]
enum InventoryCommand {
    /// Record a stock movement
    Add {
        /// Product name
        #[arg(short, long)]
        product: String,
        /// Unit of measure (unit, kilogram, liter, pack, box)
        #[arg(short, long, default_value = "")]
        unit: String,
        /// Quantity received
        #[arg(long, default_value = "")]
        inbound: String,
        /// Date received (YYYY-MM-DD, default today)
        #[arg(long, default_value = "")]
        inbound_date: String,
        /// Quantity shipped out
        #[arg(long, default_value = "")]
        outbound: String,
        /// Date shipped out (YYYY-MM-DD, default today)
        #[arg(long, default_value = "")]
        outbound_date: String,
        /// Optional remark
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List records, optionally filtered by product name
    List {
        /// Text the product name must contain
        #[arg(default_value = "")]
        query: String,
        /// Column to sort by
        #[arg(long, default_value = "id")]
        sort: SortKey,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single record
    Show {
        id: RecordId,
        #[arg(long)]
        json: bool,
    },

    /// Delete a record by id
    Delete { id: RecordId },

    /// Show total record count and total remaining stock
    Kpi {
        #[arg(long)]
        json: bool,
    },

    /// Export all records to a CSV file
    Export { path: PathBuf },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = app_config::load_config();

    match args.command {
        Commands::Config {
            database,
            default_unit,
        } => update_config(config, args.db.as_deref(), database, default_unit),
        Commands::Inventory(command) => {
            let db = match args.db.as_deref() {
                Some(path) => Database::open_at(path.to_path_buf()),
                None => Database::open(),
            }
            .with_context(|| {
                format!(
                    "Failed to open database at {}",
                    app_config::resolve_database_path(args.db.as_deref(), &config).display()
                )
            })?;

            let outcome = run(&db, command, &config);
            finish(outcome, db.close())
        }
    }
}

/// Combine the command result with the shutdown result. A command error wins;
/// a close failure after it is only logged.
fn finish(outcome: Result<()>, closed: Result<(), PersistenceError>) -> Result<()> {
    match outcome {
        Err(err) => {
            if let Err(close_err) = closed {
                log::warn!("Failed to close database: {}", close_err);
            }
            Err(err)
        }
        Ok(()) => closed.context("Failed to close database"),
    }
}

fn run(db: &Database, command: InventoryCommand, config: &AppConfig) -> Result<()> {
    match command {
        InventoryCommand::Add {
            product,
            unit,
            inbound,
            inbound_date,
            outbound,
            outbound_date,
            note,
        } => {
            let form = MovementForm {
                product,
                unit,
                inbound_quantity: inbound,
                inbound_date,
                outbound_quantity: outbound,
                outbound_date,
                note,
            };
            let today = chrono::Local::now().date_naive();
            let default_unit = config.default_unit.unwrap_or_default();
            let id = commands::add_record(db, form, today, default_unit).map_err(|e| anyhow!(e))?;
            println!("Recorded movement {}", id);
        }
        InventoryCommand::List {
            query,
            sort,
            desc,
            json,
        } => {
            let order = if desc {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            let records = commands::list_records(db, &query, sort, order).map_err(|e| anyhow!(e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print!("{}", render::render_table(&records));
            }
        }
        InventoryCommand::Show { id, json } => {
            let record = commands::get_record(db, id).map_err(|e| anyhow!(e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", render::render_table(std::slice::from_ref(&record)));
            }
        }
        InventoryCommand::Delete { id } => {
            let outcome = commands::delete_record(db, id).map_err(|e| anyhow!(e))?;
            if outcome.removed {
                println!("Deleted record {}", id);
            } else {
                println!("No record with id {}", id);
            }
        }
        InventoryCommand::Kpi { json } => {
            let kpis = commands::get_kpis(db).map_err(|e| anyhow!(e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&kpis)?);
            } else {
                print!("{}", render::render_kpis(&kpis));
            }
        }
        InventoryCommand::Export { path } => {
            let outcome = commands::export_records(db, &path).map_err(|e| anyhow!(e))?;
            println!("Exported {} records to {}", outcome.rows, outcome.path);
        }
    }
    Ok(())
}

fn update_config(
    mut config: AppConfig,
    explicit_db: Option<&Path>,
    database: Option<PathBuf>,
    default_unit: Option<Unit>,
) -> Result<()> {
    let path = app_config::config_path();
    if database.is_some() || default_unit.is_some() {
        if database.is_some() {
            config.database_path = database;
        }
        if default_unit.is_some() {
            config.default_unit = default_unit;
        }
        app_config::save_config(&config)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Updated {}", path.display());
    }

    print!("{}", config_summary(&path, &config, explicit_db));
    Ok(())
}

fn config_summary(config_file: &Path, config: &AppConfig, explicit_db: Option<&Path>) -> String {
    format!(
        "Config file:  {}\nDatabase:     {}\nDefault unit: {}\n",
        config_file.display(),
        app_config::resolve_database_path(explicit_db, config).display(),
        config.default_unit.unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_and_inventory_commands_parse() {
        let args = Args::try_parse_from(["prostock", "--db", "x.db", "config"]).unwrap();
        assert_eq!(args.db, Some(PathBuf::from("x.db")));
        assert!(matches!(args.command, Commands::Config { .. }));

        let args = Args::try_parse_from(["prostock", "list", "Flour", "--sort", "remaining", "--desc"])
            .unwrap();
        match args.command {
            Commands::Inventory(InventoryCommand::List {
                query, sort, desc, ..
            }) => {
                assert_eq!(query, "Flour");
                assert_eq!(sort, SortKey::Remaining);
                assert!(desc);
            }
            other => panic!("expected list command, got {other:?}"),
        }
    }

    #[test]
    fn test_config_summary_shows_explicit_database() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("configured.db")),
            default_unit: Some(Unit::Box),
        };
        let summary = config_summary(Path::new("config.toml"), &config, Some(Path::new("flag.db")));

        assert!(summary.contains("Database:     flag.db"));
        assert!(summary.contains("Default unit: box"));
    }

    #[test]
    fn test_command_error_survives_close_failure() {
        let closed = Err(PersistenceError::InUse(1));
        let err = finish(Err(anyhow!("Product name cannot be empty")), closed).unwrap_err();
        assert_eq!(err.to_string(), "Product name cannot be empty");
    }

    #[test]
    fn test_close_failure_is_reported_after_success() {
        let err = finish(Ok(()), Err(PersistenceError::InUse(2))).unwrap_err();
        assert_eq!(err.to_string(), "Failed to close database");
        assert!(finish(Ok(()), Ok(())).is_ok());
    }
}
