use std::path::{Path, PathBuf};

#[cfg(feature = "rocksdb_storage")]
use crate::Error;

/// Settings used to open a persistent record store.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct StorageConfig {
    /// Directory holding the database files.
    pub path: PathBuf,
    /// Create the database if it does not exist yet.
    pub create_if_missing: bool,
    /// Background threads used for flushes and compactions.
    pub parallelism: usize,
    /// How many times an optimistic transaction is committed before giving
    /// up on a contended record.
    pub max_commit_retries: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: PathBuf::from("mroots-db"),
            create_if_missing: true,
            parallelism: num_cpus::get(),
            max_commit_retries: 64,
        }
    }
}

impl StorageConfig {
    /// Default settings for a database located at `path`.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        StorageConfig {
            path: path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    #[cfg(feature = "rocksdb_storage")]
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.max_commit_retries == 0 {
            return Err(Error::InvalidConfig(
                "max_commit_retries must be at least 1".to_owned(),
            ));
        }
        if self.parallelism == 0 {
            return Err(Error::InvalidConfig(
                "parallelism must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    #[cfg(feature = "rocksdb_storage")]
    pub(crate) fn db_options(&self) -> rocksdb::Options {
        let mut opts = rocksdb::Options::default();
        opts.create_if_missing(self.create_if_missing);
        opts.create_missing_column_families(true);
        opts.increase_parallelism(i32::try_from(self.parallelism).unwrap_or(i32::MAX));
        opts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StorageConfig::with_path("/tmp/trees");
        assert_eq!(config.path, PathBuf::from("/tmp/trees"));
        assert!(config.create_if_missing);
        assert!(config.parallelism >= 1);
        assert_eq!(config.max_commit_retries, 64);
    }

    #[cfg(feature = "rocksdb_storage")]
    mod validation {
        use assert_matches::assert_matches;

        use super::*;

        #[test]
        fn test_default_config_is_valid() {
            assert!(StorageConfig::with_path("/tmp/trees").validate().is_ok());
        }

        #[test]
        fn test_zero_retries_rejected() {
            let config = StorageConfig {
                max_commit_retries: 0,
                ..Default::default()
            };
            assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));
        }

        #[test]
        fn test_zero_parallelism_rejected() {
            let config = StorageConfig {
                parallelism: 0,
                ..Default::default()
            };
            assert_matches!(config.validate(), Err(Error::InvalidConfig(_)));
        }
    }
}
