use crate::config::AppConfig;
use crate::db::connection::Database;
use crate::db::label_sheet::SpreadsheetStore;
use crate::storage::ObjectStore;

/// Everything a request handler needs; shared read-only by every worker.
pub struct AppState {
    pub cfg: AppConfig,
    pub db: Database,
    pub store: Box<dyn ObjectStore>,
    pub sheets: Box<dyn SpreadsheetStore + Send + Sync>,
}
