//! File-backed key-value storage
//!
//! Each key maps to one file in a directory. Writes land in a sibling temp
//! file first and are renamed into place, so a reader never sees a partial
//! value.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use umbra_ports::{KeyValueStore, StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        log::debug!("File storage at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `key`
    ///
    /// `[A-Za-z0-9.-]` is kept as-is and every other byte becomes `_xx`
    /// (lowercase hex), so distinct keys never share a file.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.chars().all(|c| c == '.') {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-') {
                name.push(byte as char);
            } else {
                name.push_str(&format!("_{:02x}", byte));
            }
        }

        Ok(self.dir.join(format!("{}.json", name)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        // Undecodable bytes reach the caller as text that fails to parse
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| match e.kind() {
            ErrorKind::StorageFull => StorageError::QuotaExceeded {
                key: key.to_string(),
            },
            _ => StorageError::Io(e),
        })?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "umbra-file-storage-{}-{}",
            name,
            uuid::Uuid::new_v4().simple()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_round_trip_and_delete() {
        let storage = FileStorage::open(temp_dir("round-trip")).unwrap();

        assert_eq!(storage.get("umbra.simulation_state.v1").unwrap(), None);
        storage.set("umbra.simulation_state.v1", "{}").unwrap();
        assert_eq!(
            storage.get("umbra.simulation_state.v1").unwrap().as_deref(),
            Some("{}")
        );

        storage.delete("umbra.simulation_state.v1").unwrap();
        storage.delete("umbra.simulation_state.v1").unwrap();
        assert_eq!(storage.get("umbra.simulation_state.v1").unwrap(), None);

        let _ = fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn test_keys_are_sanitized() {
        let storage = FileStorage::open(temp_dir("sanitize")).unwrap();

        storage.set("../escape/attempt", "x").unwrap();
        let path = storage.path_for("../escape/attempt").unwrap();

        assert_eq!(path.parent(), Some(storage.dir()));
        assert_eq!(storage.get("../escape/attempt").unwrap().as_deref(), Some("x"));

        let _ = fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn test_distinct_keys_get_distinct_files() {
        let storage = FileStorage::open(temp_dir("distinct")).unwrap();

        storage.set("a/b", "slash").unwrap();
        storage.set("a_b", "underscore").unwrap();

        assert_ne!(storage.path_for("a/b").unwrap(), storage.path_for("a_b").unwrap());
        assert_eq!(storage.get("a/b").unwrap().as_deref(), Some("slash"));
        assert_eq!(storage.get("a_b").unwrap().as_deref(), Some("underscore"));
        assert_eq!(
            storage.path_for("umbra.simulation_state.v1").unwrap(),
            storage.dir().join("umbra.simulation_5fstate.v1.json")
        );

        let _ = fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn test_invalid_utf8_is_read_lossily() {
        let storage = FileStorage::open(temp_dir("lossy")).unwrap();
        fs::write(storage.path_for("state").unwrap(), [0xff, 0xfe, b'{']).unwrap();

        let raw = storage.get("state").unwrap().unwrap();
        assert!(raw.ends_with('{'));
        assert!(raw.contains('\u{fffd}'));

        let _ = fs::remove_dir_all(storage.dir());
    }

    #[test]
    fn test_rejects_empty_and_dot_keys() {
        let storage = FileStorage::open(temp_dir("invalid")).unwrap();

        assert!(matches!(storage.set("", "x"), Err(StorageError::InvalidKey(_))));
        assert!(matches!(storage.get(".."), Err(StorageError::InvalidKey(_))));

        let _ = fs::remove_dir_all(storage.dir());
    }
}
