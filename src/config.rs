use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};

use crate::error::StorageError;
use crate::logging::log_dir_in;

pub const ENV_DATA_DIR: &str = "TODO_DATA_DIR";
const FALLBACK_DIR_NAME: &str = ".todo-list";

#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
}

impl AppConfig {
    /// Resolves the data directory from the override, `TODO_DATA_DIR`, or platform
    /// defaults, and creates it if needed.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self, StorageError> {
        let env_dir = env::var_os(ENV_DATA_DIR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let data_dir = resolve_data_dir(data_dir_override, env_dir)?;
        fs::create_dir_all(&data_dir)?;
        log::debug!("data directory resolved dir={}", data_dir.display());
        Ok(Self::from_data_dir(data_dir))
    }

    pub fn from_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> PathBuf {
        log_dir_in(&self.data_dir)
    }

    /// Starts file logging into [`AppConfig::log_dir`]. Keep the handle alive for the
    /// lifetime of the process.
    #[cfg(feature = "logging")]
    pub fn init_logging(
        &self,
    ) -> Result<flexi_logger::LoggerHandle, flexi_logger::FlexiLoggerError> {
        crate::logging::init_logging(&self.log_dir())
    }
}

fn resolve_data_dir(
    data_dir_override: Option<PathBuf>,
    env_dir: Option<PathBuf>,
) -> Result<PathBuf, StorageError> {
    if let Some(dir) = data_dir_override.or(env_dir) {
        return Ok(dir);
    }

    if let Some(project) = ProjectDirs::from("dev", "todo-list", "todo-list") {
        return Ok(project.data_dir().to_path_buf());
    }

    if let Some(base) = BaseDirs::new() {
        return Ok(base.home_dir().join(FALLBACK_DIR_NAME));
    }

    Ok(env::current_dir()?.join(FALLBACK_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins_over_env_dir() {
        let resolved = resolve_data_dir(
            Some(PathBuf::from("/tmp/override")),
            Some(PathBuf::from("/tmp/env")),
        )
        .unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/override"));

        let resolved = resolve_data_dir(None, Some(PathBuf::from("/tmp/env"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/tmp/env"));
    }

    #[test]
    fn falls_back_to_a_platform_directory() {
        let resolved = resolve_data_dir(None, None).unwrap();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn discover_creates_the_directory_with_logs_beneath_it() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("nested").join("data");
        let config = AppConfig::discover(Some(dir.clone())).unwrap();
        assert!(dir.is_dir());
        assert_eq!(config.data_dir(), dir.as_path());
        assert_eq!(config.log_dir(), dir.join("logs"));
    }
}
