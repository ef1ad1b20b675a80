use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::label_sheet::{seed_sheet_from_csv, SqliteSheetStore};
use crate::responses::error_to_response;
use crate::router::handle;
use crate::state::AppState;
use crate::storage::LocalObjectStore;
use astra::Server;
use tracing::{error, info, warn};

mod auth;
mod config;
mod db;
mod errors;
mod labeling;
mod listings;
mod logging;
mod responses;
mod router;
mod spreadsheets;
mod state;
mod storage;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    logging::init_logging();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let db = Database::new(cfg.database_path.clone());
    if let Err(e) = init_db(&db, &cfg.schema_path) {
        error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let sheets = SqliteSheetStore::new(db.clone());
    if let Some(path) = &cfg.label_seed_csv {
        if let Err(e) = seed_sheet_from_csv(&sheets, &cfg.label_sheet, path) {
            warn!(error = %e, path = %path, "label sheet seeding failed");
        }
    }

    let addr = cfg.bind_addr;
    let workers = cfg.max_workers;
    let state = AppState {
        store: Box::new(LocalObjectStore::new(&cfg.object_store_root)),
        sheets: Box::new(sheets),
        db,
        cfg,
    };

    info!(%addr, workers, "starting server");
    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        error!(error = %e, "server ended with error");
    }

    info!("server shut down");
}
