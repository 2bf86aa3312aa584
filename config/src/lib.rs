//! Defer policy configuration.
//!
//! Policies are read from TOML, one table per loader:
//!
//! ```toml
//! [loaders.dashboard]
//! defer = true
//! always_await = ["user"]
//! never_await = ["feed"]
//! status = 200
//! ```
//!
//! Raw deserialization structs stay private. `DeferPolicy` is resolved at
//! the parse boundary, so an overlapping pair of override lists never gets
//! past `toml::from_str`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use deferif_types::{AwaitOverrides, Directive, OverlapError, ResponseInit};
use serde::Deserialize;
use thiserror::Error;

const CONFIG_ENV_VAR: &str = "DEFERIF_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDeferPolicy {
    #[serde(default = "default_defer")]
    defer: bool,
    #[serde(default)]
    always_await: Vec<String>,
    #[serde(default)]
    never_await: Vec<String>,
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    status_text: Option<String>,
    #[serde(default)]
    headers: HashMap<String, String>,
}

fn default_defer() -> bool {
    true
}

/// A validated defer policy for one loader.
///
/// Invariant: the override lists are disjoint (enforced via
/// `#[serde(try_from)]`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawDeferPolicy")]
pub struct DeferPolicy {
    defer: bool,
    overrides: AwaitOverrides,
    init: Option<ResponseInit>,
}

impl TryFrom<RawDeferPolicy> for DeferPolicy {
    type Error = OverlapError;

    fn try_from(raw: RawDeferPolicy) -> Result<Self, Self::Error> {
        let overrides = AwaitOverrides::new(raw.always_await, raw.never_await);
        overrides.validate()?;

        let init = if raw.status.is_none() && raw.status_text.is_none() && raw.headers.is_empty()
        {
            None
        } else {
            let mut headers: Vec<(String, String)> = raw.headers.into_iter().collect();
            headers.sort();
            Some(ResponseInit {
                status: raw.status,
                status_text: raw.status_text,
                headers,
            })
        };

        Ok(Self {
            defer: raw.defer,
            overrides,
            init,
        })
    }
}

impl DeferPolicy {
    #[must_use]
    pub fn defer(&self) -> bool {
        self.defer
    }

    #[must_use]
    pub fn overrides(&self) -> &AwaitOverrides {
        &self.overrides
    }

    #[must_use]
    pub fn init(&self) -> Option<&ResponseInit> {
        self.init.as_ref()
    }

    #[must_use]
    pub fn directive(&self) -> Directive {
        Directive::Constant(self.defer)
    }
}

impl Default for DeferPolicy {
    fn default() -> Self {
        Self {
            defer: default_defer(),
            overrides: AwaitOverrides::default(),
            init: None,
        }
    }
}

/// Named policies, keyed by loader.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    loaders: HashMap<String, DeferPolicy>,
}

impl PolicyConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from [`config_path`]. A missing file is not an error; unreadable
    /// or invalid files are logged and skipped.
    #[must_use]
    pub fn load() -> Option<Self> {
        Self::load_at(config_path())
    }

    fn load_at(path: Option<PathBuf>) -> Option<Self> {
        let path = path?;
        if !path.exists() {
            return None;
        }
        match Self::load_from(&path) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(%err, "Ignoring defer policy config");
                None
            }
        }
    }

    #[must_use]
    pub fn policy(&self, loader: &str) -> Option<&DeferPolicy> {
        self.loaders.get(loader)
    }

    /// The loader's policy, or the default (defer everything) if none is
    /// configured.
    #[must_use]
    pub fn policy_or_default(&self, loader: &str) -> DeferPolicy {
        self.policy(loader).cloned().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

/// `$DEFERIF_CONFIG` if set, otherwise `deferif/config.toml` under the
/// platform config directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_path_from(env::var_os(CONFIG_ENV_VAR))
}

fn config_path_from(override_path: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = override_path.filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("deferif").join("config.toml"))
}
