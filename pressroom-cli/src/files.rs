//! Reading inputs and writing reconciled output.

use std::fs;
use std::path::{Path, PathBuf};

use pressroom_catalog::{MetadataTable, PostCollection};

use crate::error::CliError;

pub(crate) fn read_text(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::file(path, e))
}

/// Load and parse a metadata table.
pub(crate) fn load_table(path: &Path) -> Result<MetadataTable, CliError> {
    let text = read_text(path)?;
    MetadataTable::parse(&text).map_err(|e| CliError::catalog(path, e))
}

/// Load and parse a post collection.
pub(crate) fn load_posts(path: &Path) -> Result<PostCollection, CliError> {
    let text = read_text(path)?;
    PostCollection::from_json(&text).map_err(|e| CliError::catalog(path, e))
}

/// Write `posts` as pretty-printed JSON, replacing `path` atomically.
pub(crate) fn save_posts(path: &Path, posts: &PostCollection) -> Result<(), CliError> {
    let mut json = posts.to_json_pretty().map_err(|e| CliError::catalog(path, e))?;
    json.push('\n');
    write_atomic(path, &json)
}

/// Temp file used while writing `path`: `<name>.tmp` next to it.
pub(crate) fn temp_path(path: &Path) -> Result<PathBuf, CliError> {
    let name = path
        .file_name()
        .ok_or_else(|| CliError::other(format!("{} is not a file path", path.display())))?;
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

/// Write `contents` to a temp file, then rename it over `path`.
///
/// Readers of `path` see either the old or the new contents, never a
/// partial write.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::file(parent, e))?;
    }

    let tmp = temp_path(path)?;
    fs::write(&tmp, contents).map_err(|e| CliError::file(&tmp, e))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(CliError::file(path, e));
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/files_tests.rs"]
mod tests;
