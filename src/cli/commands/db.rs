use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{SCHEMA_VERSION, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::queries::{ACTIVE_TRIP_KEY, load_setting};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        // 1) MIGRATE
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed ({applied} applied).{}\n", GREEN, RESET);
        }

        // 2) INFO
        if *info {
            print_info(&mut pool, &cfg.database)?;
        }

        // 3) CHECK
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        // 4) VACUUM
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}

fn print_info(pool: &mut DbPool, path: &str) -> AppResult<()> {
    let version: u32 = pool
        .conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))?;
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);

    println!("🗄️  Database      : {path}");
    println!("📦 Size          : {:.1} KiB", size as f64 / 1024.0);
    println!("🔢 Schema        : {version} (current {SCHEMA_VERSION})");

    if version < SCHEMA_VERSION {
        println!("{RED}   pending migrations: run `db --migrate`{RESET}");
        return Ok(());
    }

    let trips: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM trips", [], |row| row.get(0))?;
    let logs: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    let active = load_setting(pool, ACTIVE_TRIP_KEY)?.unwrap_or_else(|| "--".into());

    println!("🧳 Trips         : {trips}");
    println!("📍 Active trip   : {active}");
    println!("📜 Log rows      : {logs}");
    Ok(())
}
