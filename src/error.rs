use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Csv2QifError {
    #[error("Missing configuration")]
    ConfigurationMissing,

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("Could not load config {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("Could not save config {}: {reason}", path.display())]
    ConfigSave { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, Csv2QifError>;
