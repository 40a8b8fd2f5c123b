//! Atomic `config.json` writer.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::{Config, InitError};

/// Pretty-printed JSON as the server expects to find it on disk.
pub fn render_config(config: &Config) -> Result<Vec<u8>, InitError> {
    let mut body =
        serde_json::to_vec_pretty(config).map_err(InitError::Serialize)?;
    body.push(b'\n');
    Ok(body)
}

/// Write `config` to `path`, replacing any previous file.
///
/// Missing parent directories are created. The body goes to a temp file next
/// to the target and is renamed into place, so a reader never sees a
/// half-written file. A symlinked target is written through, not replaced.
/// When the target cannot be renamed over (a single-file bind mount, or a
/// link into another filesystem) it is rewritten in place. Mode is 0644 on
/// unix.
pub fn persist(config: &Config, path: &Path) -> Result<(), InitError> {
    let body = render_config(config)?;
    write_atomically(path, &body).map_err(|source| InitError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = body.len(), "wrote config");
    Ok(())
}

fn write_atomically(path: &Path, body: &[u8]) -> io::Result<()> {
    let target = resolve_target(path);
    let dir = parent_dir(&target);
    fs::create_dir_all(&dir)?;

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(body)?;
    tmp.as_file().sync_all()?;
    set_file_mode(tmp.path())?;
    match tmp.persist(&target) {
        Ok(_) => Ok(()),
        Err(err) if needs_in_place_write(err.error.kind()) => {
            warn!(
                path = %target.display(),
                error = %err.error,
                "cannot replace config by rename; rewriting in place"
            );
            write_in_place(&target, body)
        }
        Err(err) => Err(err.error),
    }
}

/// Follow a symlinked target so the rename lands on the real file.
///
/// A missing or dangling target is written at `path` itself.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn needs_in_place_write(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::ResourceBusy | io::ErrorKind::CrossesDevices
    )
}

fn write_in_place(path: &Path, body: &[u8]) -> io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(body)?;
    file.sync_all()?;
    set_file_mode(path)
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(unix)]
fn set_file_mode(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(
        path,
        fs::Permissions::from_mode(crate::constants::CONFIG_FILE_MODE),
    )
}

#[cfg(not(unix))]
fn set_file_mode(_path: &Path) -> io::Result<()> {
    Ok(())
}
