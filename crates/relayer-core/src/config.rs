//! Relayer configuration: the path definitions the engine keeps up to date,
//! batching limits and the tunables of the relay service.

use core::fmt::{Display, Error as FmtError, Formatter};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use serde_derive::{Deserialize, Serialize};
use tracing::info;

use ibc_relay_types::core::ics04_channel::channel::Ordering;
use ibc_relay_types::core::ics24_host::identifier::{
    ChainId, ChannelId, ClientId, ConnectionId,
};
use ibc_relay_types::path::{Path, PathEnd};

use crate::error::Error;
use crate::util::lock::LockExt;

/// Keys of the path configuration that the relayer fills in from the events
/// of the transactions it submits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathConfigKey {
    ClientId,
    ConnectionId,
    ChannelId,
    Order,
    Version,
}

impl PathConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClientId => "client-id",
            Self::ConnectionId => "connection-id",
            Self::ChannelId => "channel-id",
            Self::Order => "order",
            Self::Version => "version",
        }
    }
}

impl Display for PathConfigKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.as_str())
    }
}

/// Durable storage of path configurations.
///
/// `update_path_config` upserts the given keys of the end of path
/// `path_name` that lives on `chain_id`; the last write of a key wins.
/// Implementations must serialize concurrent updates.
pub trait PathConfigStore: Send + Sync {
    fn update_path_config(
        &self,
        path_name: &str,
        chain_id: &ChainId,
        kv: &BTreeMap<PathConfigKey, String>,
    ) -> Result<(), Error>;
}

pub type SharedConfig = Arc<RwLock<Config>>;

impl PathConfigStore for RwLock<Config> {
    fn update_path_config(
        &self,
        path_name: &str,
        chain_id: &ChainId,
        kv: &BTreeMap<PathConfigKey, String>,
    ) -> Result<(), Error> {
        self.acquire_write()?
            .update_path_config(path_name, chain_id, kv)
    }
}

pub mod default {
    use super::*;

    pub fn relay_interval() -> Duration {
        Duration::from_secs(3)
    }

    pub fn metrics_addr() -> String {
        "localhost:2223".to_string()
    }

    pub fn relay_optimize_interval() -> Duration {
        Duration::from_secs(10)
    }

    pub fn relay_optimize_count() -> u64 {
        5
    }

    pub fn max_msg_num() -> usize {
        30
    }

    pub fn max_tx_size() -> usize {
        2 * 1048576 // 2 MBytes
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub batch: BatchLimits,
    #[serde(default)]
    pub paths: BTreeMap<String, Path>,
}

impl Config {
    pub fn path(&self, path_name: &str) -> Option<&Path> {
        self.paths.get(path_name)
    }

    /// Checks the relay service tunables, the batch limits and that every
    /// path joins two distinct chains.
    pub fn validate_config(&self) -> Result<(), Error> {
        self.service.validate()?;
        self.batch.validate()?;

        for (name, path) in &self.paths {
            if path.src.chain_id == path.dst.chain_id {
                return Err(Error::invalid_config(format!(
                    "path '{}' has both ends on chain '{}'",
                    name, path.src.chain_id
                )));
            }
        }

        Ok(())
    }

    /// Applies `kv` to the end of path `path_name` on `chain_id`. Either
    /// every key is applied or none is.
    pub fn update_path_config(
        &mut self,
        path_name: &str,
        chain_id: &ChainId,
        kv: &BTreeMap<PathConfigKey, String>,
    ) -> Result<(), Error> {
        let path = self
            .paths
            .get_mut(path_name)
            .ok_or_else(|| Error::unknown_path(path_name.to_string()))?;

        let end = path
            .end_mut(chain_id)
            .ok_or_else(|| Error::unknown_chain(path_name.to_string(), chain_id.clone()))?;

        let mut updated = end.clone();
        for (key, value) in kv {
            apply_path_config_value(&mut updated, *key, value)?;
        }
        *end = updated;

        info!(
            path = %path_name,
            chain_id = %chain_id,
            keys = ?kv.keys().map(PathConfigKey::as_str).collect::<Vec<_>>(),
            "path configuration updated"
        );

        Ok(())
    }
}

fn apply_path_config_value(end: &mut PathEnd, key: PathConfigKey, value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::empty_path_config_value(key));
    }

    match key {
        PathConfigKey::ClientId => {
            end.client_id = Some(value.parse::<ClientId>().map_err(Error::types)?);
        }
        PathConfigKey::ConnectionId => {
            end.connection_id = Some(value.parse::<ConnectionId>().map_err(Error::types)?);
        }
        PathConfigKey::ChannelId => {
            end.channel_id = Some(value.parse::<ChannelId>().map_err(Error::types)?);
        }
        PathConfigKey::Order => {
            end.order = value.parse::<Ordering>().map_err(Error::types)?;
        }
        PathConfigKey::Version => {
            end.version = value.to_string();
        }
    }

    Ok(())
}

/// Log levels are wrappers over [`tracing_core::Level`].
///
/// [`tracing_core::Level`]: https://docs.rs/tracing-core/0.1.17/tracing_core/struct.Level.html
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
}

/// Tunables of the relay service loop.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Time between two relay steps.
    #[serde(default = "default::relay_interval", with = "humantime_serde")]
    pub relay_interval: Duration,

    /// Address the metrics exporter listens on.
    #[serde(default = "default::metrics_addr")]
    pub metrics_addr: String,

    /// Maximum time to delay relays on the source chain for batching.
    #[serde(default = "default::relay_optimize_interval", with = "humantime_serde")]
    pub src_relay_optimize_interval: Duration,

    /// Maximum number of relays to delay on the source chain for batching.
    #[serde(default = "default::relay_optimize_count")]
    pub src_relay_optimize_count: u64,

    #[serde(default = "default::relay_optimize_interval", with = "humantime_serde")]
    pub dst_relay_optimize_interval: Duration,

    #[serde(default = "default::relay_optimize_count")]
    pub dst_relay_optimize_count: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            relay_interval: default::relay_interval(),
            metrics_addr: default::metrics_addr(),
            src_relay_optimize_interval: default::relay_optimize_interval(),
            src_relay_optimize_count: default::relay_optimize_count(),
            dst_relay_optimize_interval: default::relay_optimize_interval(),
            dst_relay_optimize_count: default::relay_optimize_count(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.relay_interval.is_zero() {
            return Err(Error::invalid_config(
                "relay interval must be greater than zero".to_string(),
            ));
        }

        if self.metrics_addr.is_empty() {
            return Err(Error::invalid_config(
                "metrics address cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Limits of the transactions built from a [`RelayMsgs`](crate::relay_msgs::RelayMsgs).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BatchLimits {
    /// Maximum number of messages per transaction, at most 100.
    #[serde(default = "default::max_msg_num")]
    pub max_msg_num: usize,

    /// Maximum encoded size of the messages of a transaction, at most 8 MBytes.
    #[serde(default = "default::max_tx_size")]
    pub max_tx_size: usize,
}

impl BatchLimits {
    pub const MAX_MSG_NUM_BOUND: usize = 100;
    pub const MAX_TX_SIZE_BOUND: usize = 8 * 1048576;

    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=Self::MAX_MSG_NUM_BOUND).contains(&self.max_msg_num) {
            return Err(Error::invalid_config(format!(
                "max_msg_num must be between 1 and {}, got {}",
                Self::MAX_MSG_NUM_BOUND,
                self.max_msg_num
            )));
        }

        if !(1..=Self::MAX_TX_SIZE_BOUND).contains(&self.max_tx_size) {
            return Err(Error::invalid_config(format!(
                "max_tx_size must be between 1 and {}, got {}",
                Self::MAX_TX_SIZE_BOUND,
                self.max_tx_size
            )));
        }

        Ok(())
    }
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_msg_num: default::max_msg_num(),
            max_tx_size: default::max_tx_size(),
        }
    }
}
