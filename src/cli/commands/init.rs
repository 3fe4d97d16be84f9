use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::db::queries::load_store;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database with all migrations
///  - a default trip when the database is empty
pub fn handle(cli: &Cli) -> AppResult<()> {
    // 1️⃣ configuration
    let cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    let db_path = cfg.database.clone();

    println!("⚙️  Initializing rTripPlanner…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_path);

    // 2️⃣ schema + seed
    let mut pool = DbPool::open(&db_path)?;
    let store = load_store(&mut pool)?;

    println!("✅ Database initialized at {}", &db_path);

    // 3️⃣ internal log (non blocking)
    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "database",
        &format!("Database initialized at {} ({} trip(s))", &db_path, store.trips().len()),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    println!("🎉 rTripPlanner initialization completed!");
    Ok(())
}
