use serde::Deserialize;
use std::fs;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}. Please ensure it exists.")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("asset_dir specified in {path} ('{asset_dir}') is not a valid directory")]
    BadAssetDir { path: String, asset_dir: String },
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Root directory the lexicon's relative video paths resolve against.
    pub asset_dir: String,
    #[serde(default = "default_lexicon_file")]
    pub lexicon_file: String,
    #[serde(default = "default_profile_file")]
    pub profile_file: String,
}

fn default_lexicon_file() -> String {
    "sasl_dictionary.json".to_string()
}

fn default_profile_file() -> String {
    "user_progress.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            asset_dir: ".".to_string(),
            lexicon_file: default_lexicon_file(),
            profile_file: default_profile_file(),
        }
    }
}

pub fn load_config_from_file(file_path: &str) -> Result<Config, ConfigError> {
    let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::Read {
        path: file_path.to_string(),
        source: e,
    })?;
    let loaded: Config = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: file_path.to_string(),
        source: e,
    })?;
    if !std::path::Path::new(&loaded.asset_dir).is_dir() {
        return Err(ConfigError::BadAssetDir {
            path: file_path.to_string(),
            asset_dir: loaded.asset_dir,
        });
    }
    Ok(loaded)
}
