#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("key must not be empty")]
    EmptyKey,
    #[error("could not determine a data directory for this platform")]
    NoDataDir,
    #[error("data directory is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(std::path::PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
