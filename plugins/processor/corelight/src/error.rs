use zeekline_api::error::PluginError;

#[derive(Debug, thiserror::Error)]
pub enum CorelightError {
    #[error("config error: {0}")]
    Config(String),

    #[error("negotiating tag '{tag}': {source}")]
    Negotiate { tag: String, source: PluginError },
}

impl From<CorelightError> for PluginError {
    fn from(e: CorelightError) -> Self {
        match e {
            CorelightError::Config(msg) => PluginError::config(msg),
            CorelightError::Negotiate { tag, source } => {
                PluginError::config(source.to_string()).with_context(format!("tag '{tag}'"))
            }
        }
    }
}
