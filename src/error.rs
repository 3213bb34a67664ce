use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("HTTP error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("{}", rejected_message(.status, .message))]
    Rejected { status: u16, message: Option<String> },
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Beneficiary index {index} out of range (form has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

fn rejected_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("Error en la subida (HTTP {status})"),
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
