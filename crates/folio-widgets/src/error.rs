use std::path::PathBuf;

use thiserror::Error;

use folio_runtime::ConfigError;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {resource}: {source}")]
    Data {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("required element missing: {0}")]
    MissingElement(&'static str),
}

pub type Result<T> = std::result::Result<T, FolioError>;
