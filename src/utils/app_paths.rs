use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Cannot determine data directory"))?
            .join("hello-cli");

        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn logs_dir() -> Result<PathBuf> {
        let logs_dir = Self::data_dir()?.join("logs");

        fs::create_dir_all(&logs_dir)?;
        Ok(logs_dir)
    }

    pub fn history_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("history.json"))
    }
}
