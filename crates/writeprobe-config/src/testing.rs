//! Isolated filesystem fixtures for tests.
//!
//! Provides `TestEnvironment` to manage:
//! - A private temporary root
//! - Config files for `Config::load_from`
//! - Scratch output files a probe can be pointed at
//!
//! # Usage
//!
//! ```ignore
//! use writeprobe_config::testing::TestEnvironment;
//!
//! let env = TestEnvironment::new()?;
//! let cfg = env.write_config("[log]\nlevel = \"debug\"\n")?;
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use tempfile::TempDir;

/// Atomic counter for unique test IDs
static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Isolated test environment with unique paths
pub struct TestEnvironment {
    /// Temporary directory (dropped on cleanup)
    _temp_dir: TempDir,
    /// Root of the isolated tree
    pub root: PathBuf,
    /// Stand-in for `~/.writeprobe`
    pub home_dir: PathBuf,
    /// Unique test ID
    pub test_id: u32,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> anyhow::Result<Self> {
        let test_id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();
        let home_dir = root.join(".writeprobe");
        std::fs::create_dir_all(&home_dir)?;

        Ok(Self {
            _temp_dir: temp_dir,
            root,
            home_dir,
            test_id,
        })
    }

    /// Path of the global config inside this environment
    pub fn global_config_path(&self) -> PathBuf {
        self.home_dir.join("config.toml")
    }

    /// Write the global config file
    pub fn write_global_config(&self, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.global_config_path();
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Write an explicit config file, named uniquely per environment
    pub fn write_config(&self, contents: &str) -> anyhow::Result<PathBuf> {
        let path = self.root.join(format!("writeprobe-{}.toml", self.test_id));
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Path for a scratch output file (not created)
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Environment variables that point a spawned probe at this environment
    pub fn probe_env(&self, config_path: &std::path::Path) -> Vec<(String, String)> {
        vec![
            (
                crate::CONFIG_PATH_ENV.to_string(),
                config_path.to_string_lossy().into_owned(),
            ),
            ("HOME".to_string(), self.root.to_string_lossy().into_owned()),
        ]
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new().expect("Failed to create test environment")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_creates_directories() {
        let env = TestEnvironment::new().unwrap();
        assert!(env.root.exists());
        assert!(env.home_dir.exists());
    }

    #[test]
    fn test_environments_are_distinct() {
        let env1 = TestEnvironment::new().unwrap();
        let env2 = TestEnvironment::new().unwrap();
        assert_ne!(env1.root, env2.root);
        assert_ne!(env1.test_id, env2.test_id);
    }

    #[test]
    fn test_write_config() {
        let env = TestEnvironment::new().unwrap();
        let path = env.write_config("[log]\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[log]\n");
    }

    #[test]
    fn test_probe_env() {
        let env = TestEnvironment::new().unwrap();
        let path = env.write_config("").unwrap();
        let vars = env.probe_env(&path);
        assert!(vars.iter().any(|(k, _)| k == "WRITEPROBE_CONFIG"));
        assert!(vars.iter().any(|(k, _)| k == "HOME"));
    }
}
