use zeekline_api::config::{ConfigParam, ConfigValues};
use zeekline_api::error::PluginError;
use zeekline_api::processor::Processor;
use zeekline_api::record::Record;
use zeekline_api::tag::Tagger;
use zeekline_processor_corelight::config::CorelightConfig;
use zeekline_processor_corelight::{Corelight, PROCESSOR_TYPE as CORELIGHT};

use crate::config::ProcessorConfig;
use crate::error::EngineError;
use crate::params::build_config_values;

struct Stage {
    config: ProcessorConfig,
    processor: Box<dyn Processor>,
}

/// Ordered processors every batch passes through.
pub struct ProcessorChain {
    stages: Vec<Stage>,
}

impl std::fmt::Debug for ProcessorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorChain")
            .field("stages", &self.names())
            .finish()
    }
}

impl ProcessorChain {
    /// Create every configured processor. Fails on the first one that cannot be built.
    pub fn build(configs: &[ProcessorConfig], tagger: &dyn Tagger) -> Result<Self, EngineError> {
        let mut stages = Vec::with_capacity(configs.len());
        for proc_cfg in configs {
            let processor = create_processor(proc_cfg, tagger)
                .map_err(|e| e.with_context(format!("processor '{}'", proc_cfg.name)))?;
            tracing::info!(processor = %proc_cfg.name, kind = %proc_cfg.kind, "created processor");
            stages.push(Stage {
                config: proc_cfg.clone(),
                processor,
            });
        }
        Ok(Self { stages })
    }

    /// Run one batch through all processors in order.
    pub fn process(&self, mut records: Vec<Record>) -> Result<Vec<Record>, EngineError> {
        for stage in &self.stages {
            records = stage
                .processor
                .process(records)
                .map_err(|e| e.with_context(format!("processor '{}'", stage.config.name)))?;
        }
        Ok(records)
    }

    /// Apply a new processor list.
    ///
    /// When names and types line up with the running chain, each changed
    /// processor is reconfigured in place; otherwise the whole chain is rebuilt.
    /// Parameter blocks are validated before any processor is touched. If a
    /// processor then rejects its new settings, the ones already switched are
    /// put back on their previous settings and the error is returned.
    pub fn reload(&mut self, configs: &[ProcessorConfig], tagger: &dyn Tagger) -> Result<(), EngineError> {
        let same_shape = configs.len() == self.stages.len()
            && configs
                .iter()
                .zip(&self.stages)
                .all(|(c, s)| c.name == s.config.name && c.kind == s.config.kind);
        if !same_shape {
            *self = Self::build(configs, tagger)?;
            tracing::info!(processors = self.stages.len(), "rebuilt processor chain (reload)");
            return Ok(());
        }

        // Validate everything before touching any running processor.
        let mut values = Vec::with_capacity(configs.len());
        for proc_cfg in configs {
            values.push(
                stage_values(proc_cfg)
                    .map_err(|e| e.with_context(format!("processor '{}'", proc_cfg.name)))?,
            );
        }

        let mut switched = Vec::new();
        for (idx, (proc_cfg, values)) in configs.iter().zip(&values).enumerate() {
            if self.stages[idx].config == *proc_cfg {
                continue;
            }
            if let Err(e) = self.stages[idx].processor.reconfigure(values, tagger) {
                self.restore(&switched, tagger);
                return Err(EngineError::from(e).with_context(format!("processor '{}'", proc_cfg.name)));
            }
            switched.push(idx);
        }
        for idx in switched {
            self.stages[idx].config = configs[idx].clone();
            tracing::info!(processor = %configs[idx].name, "reconfigured processor (reload)");
        }
        Ok(())
    }

    /// Reapply the recorded settings of the given stages, newest first.
    fn restore(&mut self, switched: &[usize], tagger: &dyn Tagger) {
        for &idx in switched.iter().rev() {
            let stage = &mut self.stages[idx];
            let restored = stage_values(&stage.config).and_then(|values| {
                stage
                    .processor
                    .reconfigure(&values, tagger)
                    .map_err(EngineError::from)
            });
            if let Err(e) = restored {
                tracing::warn!(processor = %stage.config.name, error = %e, "could not restore processor after failed reload");
            }
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.config.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

fn declared_params(kind: &str) -> Result<Vec<ConfigParam>, EngineError> {
    match kind {
        CORELIGHT => Ok(CorelightConfig::config_params()),
        other => Err(EngineError::UnknownProcessor(other.to_string())),
    }
}

fn stage_values(proc_cfg: &ProcessorConfig) -> Result<ConfigValues, EngineError> {
    let params = declared_params(&proc_cfg.kind)?;
    build_config_values(proc_cfg.config.as_ref(), &params)
}

fn create_processor(proc_cfg: &ProcessorConfig, tagger: &dyn Tagger) -> Result<Box<dyn Processor>, EngineError> {
    let values = stage_values(proc_cfg)?;
    match proc_cfg.kind.as_str() {
        CORELIGHT => {
            let processor = Corelight::from_config(&values, tagger).map_err(PluginError::from)?;
            Ok(Box::new(processor))
        }
        other => Err(EngineError::UnknownProcessor(other.to_string())),
    }
}
