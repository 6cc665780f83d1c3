use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no feed URL configured (set URL in .env or pass --url)")]
    MissingUrl,

    #[error("template not found: {0}")]
    TemplateNotFound(PathBuf),

    #[error("unsupported template format: {0}")]
    UnsupportedTemplate(String),

    #[error("invalid template: {path} ({details})")]
    InvalidTemplate { path: PathBuf, details: String },

    #[error("sheet \"{name}\" not found (available: {available})")]
    SheetNotFound { name: String, available: String },

    #[error("invalid header \"{0}\" (expected \"Name: value\")")]
    InvalidHeader(String),

    #[error("invalid query parameter \"{0}\" (expected key=value)")]
    InvalidParam(String),

    #[error("cannot create HTTP client: {0}")]
    HttpClient(String),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: status code is not 200 ({status})")]
    HttpStatus { url: String, status: u16 },

    #[error("cannot reach {url}: {details}. Maybe you set invalid URL?")]
    Connection { url: String, details: String },

    #[error("malformed XML at byte {position}: {details}")]
    Xml { position: u64, details: String },

    #[error("item {item:?} has no category at depth {depth}")]
    MissingCategory { depth: usize, item: String },

    #[error("section at byte {position} has no name")]
    MissingSectionName { position: u64 },

    #[error("closing </sections> at byte {position} without a matching opening tag")]
    UnbalancedSections { position: u64 },

    #[error("cannot save {path}: {details}. Close the result file and try again")]
    Save { path: PathBuf, details: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::MissingUrl => 1,
            Error::TemplateNotFound(_) => 1,
            Error::UnsupportedTemplate(_) => 1,
            Error::InvalidTemplate { .. } => 1,
            Error::SheetNotFound { .. } => 1,
            Error::InvalidHeader(_) => 1,
            Error::InvalidParam(_) => 1,
            Error::HttpClient(_) => 1,
            Error::Timeout { .. } => 2,
            Error::HttpStatus { .. } => 2,
            Error::Connection { .. } => 2,
            Error::Xml { .. } => 3,
            Error::MissingCategory { .. } => 3,
            Error::MissingSectionName { .. } => 3,
            Error::UnbalancedSections { .. } => 3,
            Error::Save { .. } => 4,
            Error::Io(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
