#![allow(dead_code)]

use std::{
    ops::Deref,
    path::{Path, PathBuf},
};

use abi::Config;
pub use reservation::test_utils::fixed_clock;
use tempfile::TempDir;

/// A config written to a private temp dir, snapshot path included.
pub struct TestConfig {
    pub config: Config,
    pub path: PathBuf,
    dir: TempDir,
}

impl TestConfig {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.snapshot_path = Some(
            dir.path()
                .join("snapshots")
                .join("reservations.json")
                .to_string_lossy()
                .into_owned(),
        );
        let path = dir.path().join("config.yml");
        std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();
        Self { config, path, dir }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for TestConfig {
    type Target = Config;

    fn deref(&self) -> &Self::Target {
        &self.config
    }
}
