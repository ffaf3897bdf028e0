use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Corrupt journal: {0}")]
    CorruptJournal(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Mail error: {0}")]
    MailError(String),
}

pub type Result<T> = std::result::Result<T, NotifierError>;

impl From<std::io::Error> for NotifierError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}
