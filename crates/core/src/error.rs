#[derive(Debug, thiserror::Error)]
pub enum CareError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read guidance catalog {path}: {source}", path = path.display())]
    FileRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("guidance error: {0}")]
    Guidance(#[from] ccm_guidance::GuidanceError),
    #[error("text error: {0}")]
    Text(#[from] ccm_types::TextError),
}

pub type CareResult<T> = std::result::Result<T, CareError>;
