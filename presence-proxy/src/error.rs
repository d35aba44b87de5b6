use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error while performing HTTP operation: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Error while operating on JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Error requesting Discord. Status: {0}")]
    ResponseError(reqwest::StatusCode),

    #[error("Invalid bot token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Error while parsing URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Error while parsing server address: {0}")]
    AddrParseError(#[from] std::net::AddrParseError),
}

impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}
