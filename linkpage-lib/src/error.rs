use crate::schema::SchemaErrors;
use thiserror::Error;

/// Why an import was rejected
#[derive(Error, Debug)]
pub enum ImportError {
    /// The source could not be read as non-empty UTF-8 text; the detail is for logs only
    #[error("Failed to read file")]
    FileRead(String),

    /// The input is not well-formed JSON
    #[error("{0}")]
    Parse(String),

    /// The envelope does not match the export format
    #[error("Invalid export format: {0}")]
    InvalidFormat(SchemaErrors),

    /// The envelope is fine but the state inside it is not
    #[error("Invalid app data: {0}")]
    InvalidData(SchemaErrors),
}

impl ImportError {
    /// Schema violations behind the rejection, if that is what it was
    pub fn schema_errors(&self) -> Option<&SchemaErrors> {
        match self {
            ImportError::InvalidFormat(errors) | ImportError::InvalidData(errors) => Some(errors),
            ImportError::FileRead(_) | ImportError::Parse(_) => None,
        }
    }
}

/// Why an export was refused
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid app state: {0}")]
    InvalidState(SchemaErrors),

    #[error("Failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write export file {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
