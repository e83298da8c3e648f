use crate::error::{HarvestError, Result};
use crate::results::Entry;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `entries` to `path` as a pretty-printed JSON array
///
/// Any existing file is replaced. The JSON goes to a sibling temporary file first and is
/// renamed into place, so a failed write leaves neither a partial output nor the temporary.
pub fn write_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).map_err(HarvestError::Serialize)?;

    let tmp = temporary_path(path);

    if let Err(e) = fs::write(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, path)) {
        if tmp.exists() {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                ::log::warn!("Failed to remove {}: {}", tmp.display(), cleanup);
            }
        }
        return Err(HarvestError::Write {
            path: path.to_path_buf(),
            source: e,
        });
    }

    ::log::debug!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
