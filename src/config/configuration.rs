use std::fs;
use std::path::Path;

use log::{debug, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::segmenter::Segmenter;
use crate::error::{Result, SplitError};

/// Read-only defaults: `,` separator, empty segments kept.
pub static DEFAULT_CONFIG: Lazy<SplitConfig> = Lazy::new(SplitConfig::default);

pub trait Configuration {
    /// 分隔符
    fn separator(&self) -> &str;
    /// 是否丢弃空片段
    fn skip_empty(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    pub separator: String,
    pub skip_empty: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        SplitConfig {
            separator: ",".to_string(),
            skip_empty: false,
        }
    }
}

impl Configuration for SplitConfig {
    fn separator(&self) -> &str {
        &self.separator
    }

    fn skip_empty(&self) -> bool {
        self.skip_empty
    }
}

impl SplitConfig {
    pub fn new(separator: &str, skip_empty: bool) -> Self {
        SplitConfig {
            separator: separator.to_string(),
            skip_empty,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: SplitConfig = serde_yaml::from_str(yaml)?;
        if cfg.separator.is_empty() {
            warn!("config rejected: empty separator");
            return Err(SplitError::EmptySeparator);
        }
        Ok(cfg)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path).map_err(|source| {
            warn!("read config {} error: {}", path.display(), source);
            SplitError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let cfg = Self::from_yaml_str(&yaml)?;
        debug!(
            "load config {}, separator = {:?}, skip_empty = {}",
            path.display(),
            cfg.separator,
            cfg.skip_empty
        );
        Ok(cfg)
    }

    pub fn segmenter(&self) -> Result<Segmenter> {
        Segmenter::new(&self.separator)
    }
}
