use astra::Response;
use thiserror::Error;

/// Errors originating from either the server logic
/// (routing, missing resources, etc.) or downstream layers (DB, object store).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Database Error: {0}")]
    DbError(String),
    #[error("Storage Error: {0}")]
    Storage(String),
    #[error("Parse Error: {0}")]
    Parse(String),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("CSV Error: {0}")]
    CsvError(String),
    #[error("Internal Server Error")]
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl From<rusqlite::Error> for ServerError {
    fn from(e: rusqlite::Error) -> Self {
        ServerError::DbError(e.to_string())
    }
}

impl From<csv::Error> for ServerError {
    fn from(e: csv::Error) -> Self {
        ServerError::CsvError(e.to_string())
    }
}
