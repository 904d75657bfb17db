use crate::{Index, IndexError, INDEX_VERSION};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::ffi::OsString;
use std::fs::{self, create_dir_all, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct Header {
    #[serde(default)]
    version: u32,
}

/// Sibling path used while writing, renamed over the target once complete.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the whole index, replacing any previous file. Readers never see a
/// partially written index: the JSON goes to a staging file first.
pub fn save_index(path: &Path, index: &Index) -> Result<()> {
    if let Some(dir) = path.parent() {
        create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let staging = staging_path(path);
    let json = serde_json::to_string_pretty(index)?;
    let written = write_staged(&staging, json.as_bytes())
        .and_then(|()| fs::rename(&staging, path).with_context(|| format!("replacing {}", path.display())));
    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written
}

fn write_staged(staging: &Path, bytes: &[u8]) -> Result<()> {
    let mut f = File::create(staging).with_context(|| format!("writing {}", staging.display()))?;
    f.write_all(bytes)?;
    f.sync_all()?;
    Ok(())
}

/// Read and validate a persisted index.
pub fn load_index(path: &Path) -> Result<Index, IndexError> {
    let mut f = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IndexError::Missing(path.to_path_buf()),
        _ => IndexError::Io(e),
    })?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let header: Header = serde_json::from_str(&buf)?;
    if header.version != INDEX_VERSION {
        return Err(IndexError::VersionMismatch { expected: INDEX_VERSION, found: header.version });
    }
    let index: Index = serde_json::from_str(&buf)?;
    Ok(index)
}
