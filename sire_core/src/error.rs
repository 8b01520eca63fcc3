use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("card dataset is not valid JSON: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("card id `{id}` appears more than once in the dataset")]
    DuplicateCardId { id: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
