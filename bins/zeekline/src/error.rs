#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Engine(#[from] zeekline_engine::EngineError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
