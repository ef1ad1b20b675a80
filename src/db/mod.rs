pub mod connection;
pub mod label_sheet;
