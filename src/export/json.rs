use crate::errors::AppResult;
use crate::store::Snapshot;
use std::path::Path;

/// Write a pretty-printed snapshot; the same format `import` reads.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> AppResult<()> {
    std::fs::write(path, snapshot.to_json_pretty()?)?;
    Ok(())
}
