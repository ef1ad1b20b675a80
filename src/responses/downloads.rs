// responses/downloads.rs
use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Return XLSX file as HTTP response
pub fn xlsx_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    download_response(buffer, XLSX_MIME, filename)
}

/// Return CSV bytes as a download
pub fn csv_response(buffer: Vec<u8>, filename: &str) -> ResultResp {
    download_response(buffer, mime::TEXT_CSV_UTF_8.as_ref(), filename)
}

fn download_response(buffer: Vec<u8>, content_type: &str, filename: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(buffer))
        .map_err(|_| ServerError::InternalError)
}
