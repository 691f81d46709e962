//! Applying a marker block to a file on disk.

use std::path::Path;

use aip_fs::io;
use tracing::{debug, info, warn};

use crate::editor::{self, Placement};
use crate::error::Result;
use crate::marker::Marker;

/// Install `block` into the file at `path`, creating the file first if
/// needed.
///
/// Creating the file and its parent directories is best-effort: a failure is
/// logged and the subsequent read reports the real problem. Reading and
/// writing failures are returned as errors; the previous file contents are
/// only replaced once the new contents are fully on disk.
pub fn ensure_and_replace(path: &Path, marker: &Marker, block: &str) -> Result<Placement> {
    match io::ensure_file(path) {
        Ok(true) => info!(path = %path.display(), "created missing file"),
        Ok(false) => {}
        Err(e) => warn!(path = %path.display(), error = %e, "could not create file"),
    }

    let current = io::read_text(path)?;
    let edited = editor::edit(marker, &current, block);

    match edited.placement {
        Placement::Appended => {
            debug!(path = %path.display(), marker = %marker, "no marker block found, appending")
        }
        Placement::Replaced(span) => debug!(
            path = %path.display(),
            marker = %marker,
            begin = span.begin,
            end = span.end,
            "replacing marker block"
        ),
    }

    io::write_text(path, &edited.text)?;
    Ok(edited.placement)
}

/// Compute what [`ensure_and_replace`] would write, without touching the
/// disk. A missing file is treated as empty.
pub fn preview(path: &Path, marker: &Marker, block: &str) -> Result<String> {
    let current = if path.exists() {
        io::read_text(path)?
    } else {
        String::new()
    };
    Ok(editor::replace_block(marker, &current, block))
}
