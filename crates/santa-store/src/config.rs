use std::path::{Path, PathBuf};

use santa_core::config::CoreConfig;

use crate::error::{StoreError, StoreResult};

pub const DEFAULT_FILE_NAME: &str = "santa.sqlite";

/// Where the store lives and which core limits it enforces.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub root: PathBuf,
    pub file_name: String,
    pub core: CoreConfig,
}

impl StoreConfig {
    /// Store rooted at `root` with default file name and core limits.
    pub fn local(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(StoreError::InvalidArgument(
                "store root must not be empty".to_string(),
            ));
        }
        Ok(Self {
            root,
            file_name: DEFAULT_FILE_NAME.to_string(),
            core: CoreConfig::default(),
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_joins_root() {
        let cfg = StoreConfig::local(".santa").unwrap();
        assert_eq!(cfg.db_path(), PathBuf::from(".santa").join("santa.sqlite"));
    }

    #[test]
    fn empty_root_rejected() {
        assert!(StoreConfig::local("").is_err());
    }
}
