use std::path::{Path, PathBuf};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Layered loading: optional TOML file, then `PREFIX_SECTION__KEY`
/// environment variables on top.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";
    /// Names the TOML file to read. Deliberately outside `PREFIX` so it is not
    /// mistaken for a config key.
    const FILE_VAR: &'static str = "TODO_MANAGER_CONFIG";
    const DEFAULT_FILE: &'static str = "todo_manager.toml";

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn config_file() -> (PathBuf, bool) {
        match std::env::var_os(Self::FILE_VAR) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(Self::DEFAULT_FILE), false),
        }
    }

    fn from_env() -> Result<Self> {
        load_dotenv();
        let (file, required) = Self::config_file();

        let settings = config_rs::Config::builder()
            .add_source(
                config_rs::File::new(&file.to_string_lossy(), config_rs::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read config from {} and environment", file.display()))?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

// The crate-root `.env` wins over one in the working directory. Variables
// already set in the process are never overwritten.
fn load_dotenv() {
    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if dotenvy::from_path(&manifest_env).is_err() {
        let _ = dotenvy::dotenv();
    }
}
