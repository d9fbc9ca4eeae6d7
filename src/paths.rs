use anyhow::{Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub configDir: PathBuf,
    pub configFile: PathBuf,
}

impl ConfigPaths {
    pub fn Resolve() -> Result<Self> {
        let home = env::var("HOME").map_err(|_| anyhow!("HOME is not set"))?;

        let root = Path::new(&home)
            .join(".config")
            .join("shopify-theme-manager");

        let configFile = ResolvePath("STM_CONFIG_FILE", &root, "config.json");

        Ok(Self::ForFile(configFile))
    }

    /// Paths for an explicit config file; its parent becomes the config directory.
    pub fn ForFile(configFile: PathBuf) -> Self {
        let configDir = configFile
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            configDir,
            configFile,
        }
    }
}

fn ResolvePath(envKey: &str, root: &Path, defaultName: &str) -> PathBuf {
    let envValue = env::var(envKey).ok();

    match envValue {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => root.join(defaultName),
    }
}
