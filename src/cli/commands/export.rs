use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::Session;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use tracing::warn;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let session = Session::open(cfg)?;
        let path = ExportLogic::export(&session.store, *format, file, cfg.base_currency, *force)?;

        if let Err(e) = ttlog(
            &session.pool.conn,
            "export",
            format.as_str(),
            &format!("Exported to {}", path.display()),
        ) {
            warn!(error = %e, "failed to write internal log");
        }
    }
    Ok(())
}
