use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Permission bits of an existing file, or `default` when it does not exist.
pub fn mode_or(path: &Path, default: u32) -> u32 {
    #[cfg(unix)]
    {
        if let Ok(meta) = fs::metadata(path) {
            return meta.permissions().mode() & 0o777;
        }
    }
    let _ = path;
    default
}

pub fn set_file_permissions(file: &fs::File, path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(mode);
        file.set_permissions(perm)
            .with_context(|| format!("set permissions {:o} on {}", mode, path.display()))?;
    }
    #[cfg(not(unix))]
    {
        let _ = (file, path, mode);
    }
    Ok(())
}

/// Give `file` the owner and group of the existing file at `from`.
///
/// Best-effort: an unprivileged process usually cannot change the owner, and
/// the rewrite proceeds with its own ownership in that case.
pub fn copy_owner(from: &Path, file: &fs::File) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let (Ok(want), Ok(have)) = (fs::metadata(from), file.metadata()) else {
            return;
        };
        if (want.uid(), want.gid()) == (have.uid(), have.gid()) {
            return;
        }
        if let Err(e) = std::os::unix::fs::fchown(file, Some(want.uid()), Some(want.gid())) {
            tracing::warn!(path = %from.display(), error = %e, "cannot preserve store ownership");
        }
    }
    #[cfg(not(unix))]
    {
        let _ = (from, file);
    }
}
