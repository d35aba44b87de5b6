pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Error during HTTP request: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("HTTP {}", .0.as_u16())]
    ResponseError(reqwest::StatusCode),

    #[error("Error reading or writing preferences: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error while operating on JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Refresh interval must be a positive number of milliseconds")]
    InvalidInterval,

    #[error("Unknown command: {0}")]
    InvalidCommand(String),
}

impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}
