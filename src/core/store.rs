//! Reading and writing the credential file.
//!
//! The store is materialized whole on every command: read every line, mutate
//! in memory, write every line back. `add` is the exception and appends.

use crate::constants;
use crate::models::entry::Entry;
use crate::util::fs as store_fs;
use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Load all entries in file order. A missing file is an empty store.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "store missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e).with_context(|| format!("open store {}", path.display())),
    };

    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("read store {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        entries.push(Entry::parse(trimmed));
    }
    tracing::debug!(path = %path.display(), entries = entries.len(), "read store");
    Ok(entries)
}

/// Render entries as the on-disk text: one per line, trailing newline.
fn render(entries: &[Entry]) -> String {
    let lines: Vec<String> = entries.iter().map(Entry::to_line).collect();
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// Replace the whole store with `entries`.
///
/// Content goes to a temp file next to the store and is renamed over it, so a
/// failed write leaves the previous store in place. A symlinked store is
/// written through to its target, and an existing file keeps its permission
/// bits and, where the process may set them, its owner and group.
pub fn write_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    let content = render(entries);
    let target = resolve_target(path)?;
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mode = store_fs::mode_or(&target, constants::STORE_FILE_MODE);

    let mut tmp = tempfile::Builder::new()
        .prefix(".htpasswd-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("create temp store in {}", parent.display()))?;
    tmp.write_all(content.as_bytes())
        .context("write temp store")?;
    tmp.flush().context("flush temp store")?;
    store_fs::set_file_permissions(tmp.as_file(), tmp.path(), mode)?;
    store_fs::copy_owner(&target, tmp.as_file());

    tmp.persist(&target)
        .map_err(|err| anyhow::anyhow!("persist store {}: {}", target.display(), err.error))?;
    tracing::debug!(path = %target.display(), entries = entries.len(), "rewrote store");
    Ok(())
}

/// The real file behind `path`, following symlinks. A store that does not
/// exist yet is written at `path` itself.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(real) => Ok(real),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e).with_context(|| format!("resolve store {}", path.display())),
    }
}

/// Append one entry, creating the store if needed.
///
/// If the existing file does not end in a newline, one is written first so the
/// new record does not merge into the last line.
pub fn append_entry(path: &Path, entry: &Entry) -> Result<()> {
    let mut options = OpenOptions::new();
    options.create(true).read(true).append(true);
    #[cfg(unix)]
    options.mode(constants::STORE_FILE_MODE);
    let mut file = options
        .open(path)
        .with_context(|| format!("open store {} for append", path.display()))?;

    let mut line = String::new();
    if !ends_with_newline(&mut file).with_context(|| format!("inspect {}", path.display()))? {
        line.push('\n');
    }
    line.push_str(&entry.to_line());
    line.push('\n');

    file.write_all(line.as_bytes())
        .with_context(|| format!("append to store {}", path.display()))?;
    tracing::debug!(path = %path.display(), "appended entry");
    Ok(())
}

/// True for an empty file or one whose last byte is `\n`.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
