pub mod chain;
pub mod config;
pub mod error;
pub mod params;
pub mod tagger;

pub use chain::ProcessorChain;
pub use config::{IngestConfig, ProcessorConfig};
pub use error::EngineError;
pub use tagger::MemoryTagger;
