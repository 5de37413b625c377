use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("cannot pick a best match from an empty variant list")]
    EmptyVariantList,

    #[error("unknown variant group: {key}")]
    UnknownGroup { key: String },

    #[error("option {option_id} does not exist in group {group}")]
    UnknownOption { group: String, option_id: String },

    #[error("unknown product: {id}")]
    UnknownProduct { id: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogFileParse(#[from] serde_yaml::Error),

    #[error("catalog validation error: {0}")]
    Validation(String),
}
