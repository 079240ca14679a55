use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodexError {
    #[error("Species not found: {0}")]
    SpeciesNotFound(String),

    #[error("Duplicate species name: {0}")]
    DuplicateSpecies(String),

    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Duplicate policy name: {0}")]
    DuplicatePolicy(String),

    #[error("Validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Condition parse error: {0}")]
    ConditionParse(String),

    #[error("Unsupported content file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlWriteError(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, CodexError>;
