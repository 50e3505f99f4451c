// ClaimAudit - platform/fs.rs
//
// Filesystem access for uploads: size-checked reads of a CSV from disk.

use crate::util::error::IngestError;
use std::io::Read;
use std::path::Path;

/// Read an uploaded file into memory, refusing files over `max_bytes`.
///
/// The size is checked from metadata before reading, and the read itself is
/// capped so a file that grows while being read cannot exceed the limit.
pub fn read_upload(path: &Path, max_bytes: u64) -> Result<Vec<u8>, IngestError> {
    let io_err = |e| IngestError::Io {
        path: path.to_path_buf(),
        source: e,
    };

    let file = std::fs::File::open(path).map_err(io_err)?;
    let size = file.metadata().map_err(io_err)?.len();
    if size > max_bytes {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: max_bytes,
        });
    }

    let mut bytes = Vec::with_capacity(size as usize);
    file.take(max_bytes + 1)
        .read_to_end(&mut bytes)
        .map_err(io_err)?;
    if bytes.len() as u64 > max_bytes {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: bytes.len() as u64,
            max_size: max_bytes,
        });
    }

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Upload read");
    Ok(bytes)
}

/// Display name for a path: the file name, or the whole path if it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

/// True if the path carries one of the given extensions (case-insensitive).
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
}
