//! Output file naming and writing.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::date_range::DateRange;
use crate::error::SunCalResult;

/// File extensions treated as calendar files when tagging names with a date range.
const CALENDAR_EXTENSIONS: &[&str] = &["ics", "ical", "ifb"];

/// Destination path for a run.
///
/// With `date_in_file_name` set, `_YYYYMMDD_to_YYYYMMDD` is inserted before a
/// recognized calendar extension, or `_YYYYMMDD_to_YYYYMMDD.ics` is appended
/// when the name has none.
pub fn derive_output_path(base: &Path, range: &DateRange, date_in_file_name: bool) -> PathBuf {
    if !date_in_file_name {
        return base.to_path_buf();
    }

    let suffix = range.file_suffix();

    let known_extension = base
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            CALENDAR_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        });

    match (known_extension, base.file_stem().and_then(|s| s.to_str())) {
        (Some(ext), Some(stem)) => base.with_file_name(format!("{stem}_{suffix}.{ext}")),
        _ => {
            let mut name = base.as_os_str().to_os_string();
            name.push(format!("_{suffix}.ics"));
            PathBuf::from(name)
        }
    }
}

/// Write `payload` to `path` atomically.
///
/// The bytes go to a temporary file in the destination directory which is
/// then renamed over `path`, so readers never observe a partial calendar.
pub fn write_calendar(path: &Path, payload: &[u8]) -> SunCalResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(payload)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}
