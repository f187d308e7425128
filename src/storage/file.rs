use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CartStore, StoreError};

/// One file per key inside a data directory. Writes go through a temporary
/// file and a rename so a crash never leaves a half-written snapshot.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) the data directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StoreError::Io(format!("{}: {}", root.display(), e)))?;
        debug!(root = %root.display(), "File store opened");
        Ok(Self { root })
    }

    #[allow(dead_code)]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl CartStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, blob).map_err(|e| StoreError::Io(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))
    }
}
