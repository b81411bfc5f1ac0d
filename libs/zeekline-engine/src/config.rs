use serde::Deserialize;

use crate::error::EngineError;

/// Root configuration — parsed from TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Capacity of the in-process tag table.
    #[serde(default = "default_max_tags")]
    pub max_tags: usize,

    /// Processors, applied to every batch in declaration order.
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_tags: default_max_tags(),
            processors: Vec::new(),
        }
    }
}

fn default_max_tags() -> usize {
    usize::from(u16::MAX)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Unique processor name (for logs and reload matching).
    pub name: String,
    /// Processor type, e.g. `"corelight"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Processor parameters, validated against the type's declarations.
    #[serde(default)]
    pub config: Option<toml::Value>,
}

impl IngestConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EngineError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.max_tags == 0 || self.max_tags > default_max_tags() {
            return Err(EngineError::Config(format!(
                "max_tags must be between 1 and {}, got {}",
                default_max_tags(),
                self.max_tags
            )));
        }
        for (i, proc_cfg) in self.processors.iter().enumerate() {
            if self.processors[..i].iter().any(|p| p.name == proc_cfg.name) {
                return Err(EngineError::Config(format!(
                    "duplicate processor name '{}'",
                    proc_cfg.name
                )));
            }
        }
        Ok(())
    }
}
