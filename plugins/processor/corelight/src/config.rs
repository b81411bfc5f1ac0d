use zeekline_api::config::{ConfigParam, ConfigValues, ParamContext};

use crate::error::CorelightError;

/// Prefix used when none (or an empty one) is configured.
pub const DEFAULT_PREFIX: &str = "zeek";

/// Corelight processor configuration.
///
/// `prefix` is prepended to each log category to form its tag name, so with
/// the default prefix conn logs go to `zeekconn`, dns logs to `zeekdns`, and
/// so on. It does not affect column lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorelightConfig {
    pub prefix: String,
}

impl Default for CorelightConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl CorelightConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
        .normalized()
    }

    /// Parameter declarations for the config loader.
    pub fn config_params() -> Vec<ConfigParam> {
        vec![ConfigParam::string(
            "prefix",
            ParamContext::Reload,
            DEFAULT_PREFIX,
            "Tag name prefix; each log category is appended to it",
        )]
    }

    /// Read typed values. Missing or empty `prefix` falls back to the default.
    pub fn from_config(config: &ConfigValues) -> Result<Self, CorelightError> {
        let prefix = match config.get("prefix") {
            None => String::new(),
            Some(_) => config
                .get_str("prefix")
                .ok_or_else(|| CorelightError::Config("parameter 'prefix': expected string".into()))?
                .to_string(),
        };
        Ok(Self { prefix }.normalized())
    }

    fn normalized(mut self) -> Self {
        if self.prefix.is_empty() {
            self.prefix = DEFAULT_PREFIX.to_string();
        }
        self
    }
}
