#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("audio error: {0}")]
    Audio(String),
    #[error("notification error: {0}")]
    Notify(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
