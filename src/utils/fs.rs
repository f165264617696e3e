//! Crash-safe file replacement shared by the transaction cache and the config file.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::Result;

const TMP_SUFFIX: &str = "tmp";

/// Sibling staging path: `transactions.json` becomes `transactions.json.tmp`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to the staging path, then renames it over `path`.
///
/// A failed write leaves any existing file at `path` untouched.
pub(crate) fn write_replacing(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn tmp_path_appends_suffix_to_extension() {
        let tmp = tmp_path(Path::new("/data/transactions.json"));
        assert_eq!(tmp, PathBuf::from("/data/transactions.json.tmp"));
        assert_eq!(tmp_path(Path::new("/data/cache")), PathBuf::from("/data/cache.tmp"));
    }

    #[test]
    fn write_replacing_creates_parents_and_leaves_no_staging_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("file.json");
        write_replacing(&path, "[1]").unwrap();
        write_replacing(&path, "[2]").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[2]");
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn failed_write_preserves_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.json");
        write_replacing(&path, "original").unwrap();
        fs::create_dir_all(tmp_path(&path)).unwrap();

        assert!(write_replacing(&path, "replacement").is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    }
}
