use crate::error::{Error, Result};
use crate::{ENV_AWS_REGION, ENV_CONFIG_PATH, ENV_SHARE_NODE_API_KEY, ENV_SHARE_NODE_URL};

use std::env;

mod file;

use file::{ConfigFile, ShareNodeEntry};

pub const DEFAULT_RETRIES: u32 = 3;

#[derive(Debug, Clone)]
pub struct Config {
    share_node_url: String,
    share_node_api_key: String,
    aws_region: Option<String>,
    retries: u32,
    accept_invalid_certs: bool,
}

impl Config {
    /// Reads the environment once, layered over the optional YAML file named by
    /// `SHARE_RELAY_CONFIG`.
    pub fn new() -> Result<Self> {
        let conf_path = env::var(ENV_CONFIG_PATH).ok();
        let file = ConfigFile::new(conf_path);

        Self::resolve(
            file.share_node(),
            env::var(ENV_SHARE_NODE_URL).ok(),
            env::var(ENV_SHARE_NODE_API_KEY).ok(),
            env::var(ENV_AWS_REGION).ok(),
        )
    }

    fn resolve(
        entry: ShareNodeEntry,
        url: Option<String>,
        api_key: Option<String>,
        aws_region: Option<String>,
    ) -> Result<Self> {
        let share_node_url = non_empty(url)
            .or(non_empty(entry.url))
            .ok_or_else(|| Error::Config(format!("`{ENV_SHARE_NODE_URL}` is required")))?;
        let share_node_api_key = non_empty(api_key)
            .or(non_empty(entry.api_key))
            .ok_or_else(|| Error::Config(format!("`{ENV_SHARE_NODE_API_KEY}` is required")))?;

        Ok(Self {
            share_node_url,
            share_node_api_key,
            aws_region: non_empty(aws_region),
            retries: entry.retries.unwrap_or(DEFAULT_RETRIES),
            accept_invalid_certs: entry.accept_invalid_certs.unwrap_or(true),
        })
    }

    pub fn share_node_url(&self) -> &str {
        &self.share_node_url
    }

    pub fn share_node_api_key(&self) -> &str {
        &self.share_node_api_key
    }

    pub fn aws_region(&self) -> Option<String> {
        self.aws_region.clone()
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

#[cfg(test)]
impl Config {
    pub fn for_test<T: Into<String>>(share_node_url: T) -> Self {
        Self {
            share_node_url: share_node_url.into(),
            share_node_api_key: "test-key".into(),
            aws_region: Some("us-east-1".into()),
            retries: DEFAULT_RETRIES,
            accept_invalid_certs: true,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_reads_share_node_settings_from_env_values() {
        let config = Config::resolve(
            ShareNodeEntry::default(),
            Some("https://node.example.com/graphql/".into()),
            Some("secret".into()),
            Some("us-east-2".into()),
        )
        .unwrap();

        assert_eq!(config.share_node_url(), "https://node.example.com/graphql/");
        assert_eq!(config.share_node_api_key(), "secret");
        assert_eq!(config.aws_region(), Some("us-east-2".into()));
        assert_eq!(config.retries(), 3);
        assert!(config.accept_invalid_certs());
    }

    #[test]
    fn it_prefers_env_values_over_the_config_file() {
        let entry = ShareNodeEntry {
            url: Some("https://file.example.com/graphql/".into()),
            api_key: Some("file-key".into()),
            retries: Some(5),
            accept_invalid_certs: Some(false),
        };
        let config = Config::resolve(entry, None, Some("env-key".into()), None).unwrap();

        assert_eq!(config.share_node_url(), "https://file.example.com/graphql/");
        assert_eq!(config.share_node_api_key(), "env-key");
        assert_eq!(config.aws_region(), None);
        assert_eq!(config.retries(), 5);
        assert!(!config.accept_invalid_certs());
    }

    #[test]
    fn it_returns_err_without_share_node_url() {
        let result = Config::resolve(
            ShareNodeEntry::default(),
            Some("  ".into()),
            Some("secret".into()),
            None,
        );

        match result {
            Err(Error::Config(message)) => {
                assert_eq!(message, "`SHARE_NODE_URL` is required");
            }
            _ => {
                unreachable!("The result shoud be a config error");
            }
        }
    }

    #[test]
    fn it_returns_err_without_api_key() {
        let result = Config::resolve(
            ShareNodeEntry::default(),
            Some("https://node.example.com/graphql/".into()),
            None,
            None,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
