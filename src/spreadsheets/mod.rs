pub mod export_csv;
pub mod export_xlsx;

pub use export_csv::agents_csv;
pub use export_xlsx::agents_xlsx;
