pub mod downloads;
pub mod errors;
pub mod html;

pub use errors::{error_to_response, ResultResp};

pub use downloads::{csv_response, xlsx_response};
pub use html::{html_response, redirect};
