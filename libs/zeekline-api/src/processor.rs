use crate::config::ConfigValues;
use crate::error::PluginError;
use crate::record::Record;
use crate::tag::Tagger;

/// Processor — rewrites batches of records between ingestion and delivery.
///
/// A processor receives the batch by value and hands it back: same records,
/// same order, same length. Records it does not recognise are returned as-is.
///
/// `process` takes `&self`, so one processor can serve several workers at once.
pub trait Processor: Send + Sync {
    /// Process one batch.
    fn process(&self, records: Vec<Record>) -> Result<Vec<Record>, PluginError>;

    /// Apply a new configuration at runtime.
    ///
    /// `config` contains the full new `ConfigValues`. `tagger` is available for
    /// processors that route by tag.
    ///
    /// Default: returns error (processor does not support runtime reconfiguration).
    fn reconfigure(&mut self, _config: &ConfigValues, _tagger: &dyn Tagger) -> Result<(), PluginError> {
        Err(PluginError::logic("reconfigure not supported"))
    }
}
