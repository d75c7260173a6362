use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Proxy configuration: the sharding rules of the cluster.
///
/// Shards must be listed in ascending start order and cover the key space
/// contiguously. The start key of the first shard and the end key of the
/// last shard are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub shards: Vec<ShardConfig>,
}

/// Configuration of one shard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShardConfig {
    /// Start key of the range, inclusive.
    #[serde(default)]
    pub start: String,
    /// Byte form of the start key. Only used when `start` is empty.
    #[serde(default)]
    pub start_bytes: Vec<u8>,
    /// End key of the range, exclusive.
    #[serde(default)]
    pub end: String,
    /// Byte form of the end key. Only used when `end` is empty.
    #[serde(default)]
    pub end_bytes: Vec<u8>,
    /// Address of the shard server, as "host:port".
    pub address: String,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Config =
            serde_yaml::from_reader(file).context("failed to parse config file")?;
        anyhow::ensure!(!config.shards.is_empty(), "config lists no shards");
        Ok(config)
    }
}

impl ShardConfig {
    /// The configured start key, preferring the string form.
    pub fn start_key(&self) -> Vec<u8> {
        if !self.start.is_empty() {
            self.start.clone().into_bytes()
        } else {
            self.start_bytes.clone()
        }
    }

    /// The configured end key, preferring the string form.
    pub fn end_key(&self) -> Vec<u8> {
        if !self.end.is_empty() {
            self.end.clone().into_bytes()
        } else {
            self.end_bytes.clone()
        }
    }
}
