//! Resolves database and log locations from flags and platform defaults.

use crate::cli::Cli;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "estate";
const DB_FILE_NAME: &str = "estate.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// Always absolute.
    pub log_dir: PathBuf,
}

impl RuntimeConfig {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let app_dir = dirs::data_local_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| cwd.clone());

        let db_path = cli
            .db
            .clone()
            .unwrap_or_else(|| app_dir.join(DB_FILE_NAME));
        let log_dir = cli
            .log_dir
            .as_deref()
            .map(|dir| absolutize(&cwd, dir))
            .unwrap_or_else(|| app_dir.join("logs"));
        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| estate_core::default_log_level().to_string());

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Creates the database's parent directory when missing.
    pub fn ensure_db_parent(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory `{}`", parent.display())
            })?;
        }
        Ok(())
    }
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
