use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::Result;

/// Rendered bytes sitting in a temp file beside their destination. Dropping
/// it removes the temp file and leaves the destination untouched.
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

/// Write `bytes` to a temp file in the destination's directory so the final
/// move is a rename on the same filesystem.
pub fn stage(target: &Path, bytes: &[u8]) -> Result<StagedFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    debug!(path = %target.display(), bytes = bytes.len(), "output staged");
    Ok(StagedFile {
        temp,
        target: target.to_path_buf(),
    })
}

/// Move every staged file onto its destination. Call only once all outputs
/// of the run have been staged.
pub fn commit(files: Vec<StagedFile>) -> Result<()> {
    for StagedFile { temp, target } in files {
        temp.persist(&target).map_err(|e| e.error)?;
        debug!(path = %target.display(), "output committed");
    }
    Ok(())
}
