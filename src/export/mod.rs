//! File exports: CSV expense listing and JSON snapshots.

pub mod csv;
mod fs_utils;
pub mod json;

pub(crate) use fs_utils::ensure_writable;

use crate::errors::{AppError, AppResult};
use crate::money::Currency;
use crate::store::TripStore;
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Completion message shared by every export format.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Expenses of the active trip
    Csv,
    /// Full snapshot of every trip (re-importable)
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write `store` to `file`. An existing file is only replaced after
    /// confirmation, or directly with `force`.
    pub fn export(
        store: &TripStore,
        format: ExportFormat,
        file: &str,
        base: Currency,
        force: bool,
    ) -> AppResult<PathBuf> {
        let path = expand_tilde(file);
        if path.as_os_str().is_empty() {
            return Err(AppError::Export("empty output path".into()));
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv => {
                let out = BufWriter::new(File::create(&path)?);
                csv::write_expenses(out, store.active_trip(), base)?;
            }
            ExportFormat::Json => json::write_snapshot(&path, &store.export_snapshot())?,
        }

        info!(format = format.as_str(), path = %path.display(), "export written");
        notify_export_success(&format.as_str().to_uppercase(), &path);
        Ok(path)
    }
}
