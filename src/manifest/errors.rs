use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("не удалось прочитать манифест: {0}")]
    Io(#[from] std::io::Error),

    #[error("не удалось разобрать манифест: {0}")]
    Parse(#[from] toml::de::Error),
}
