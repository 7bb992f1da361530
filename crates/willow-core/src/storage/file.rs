use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::storage::{KvError, KvResult, KvStore};

/// File-backed [`KvStore`]: one file per key under a base directory.
///
/// Values are written verbatim, so a key may hold a JSON document or a bare
/// string like a plan id.
#[derive(Debug, Clone)]
pub struct FileKv {
    root: PathBuf,
}

impl FileKv {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> KvResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for_key(&self, key: &str) -> KvResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.contains("..") {
            return Err(KvError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.root.join(key))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let path = self.path_for_key(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(KvError::Io(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let path = self.path_for_key(key)?;
        fs::write(&path, value)?;
        debug!("wrote {} bytes under key {}", value.len(), key);
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        let path = self.path_for_key(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(KvError::Io(err)),
        }
    }
}
