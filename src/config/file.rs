use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    share_node: Option<ShareNodeEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ShareNodeEntry {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub retries: Option<u32>,
    pub accept_invalid_certs: Option<bool>,
}

impl ConfigFile {
    pub fn new<P: AsRef<Path>>(path: Option<P>) -> Self {
        path.map(read_config).unwrap_or_default()
    }

    pub fn share_node(&self) -> ShareNodeEntry {
        self.share_node.clone().unwrap_or_default()
    }
}

fn read_config<P: AsRef<Path>>(path: P) -> ConfigFile {
    _read_config(path).unwrap_or_else(|err| {
        warn!("{err}");
        warn!("Skip reading config file.");
        ConfigFile::default()
    })
}

fn _read_config<P: AsRef<Path>>(path: P) -> Result<ConfigFile, String> {
    let content = fs::read_to_string(&path)
        .map_err(|err| format!("Failed to read: {}. {err}", path.as_ref().to_string_lossy()))?;
    serde_yaml::from_str(&content)
        .map_err(|err| format!("Failed to deserialize config file: {err}"))
}
