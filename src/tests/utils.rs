use crate::config::AppConfig;
use crate::db::connection::{init_db, Database};
use crate::db::label_sheet::{NewSheetRow, SpreadsheetStore, SqliteSheetStore};
use crate::state::AppState;
use crate::storage::MemoryObjectStore;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// Initialize a fresh test DB using the production schema. Every call gets its
/// own file so tests can run in parallel.
pub fn init_test_db() -> Database {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "listing_dashboards_test_{}_{nanos}_{n}.sqlite3",
        std::process::id()
    ));
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db, "sql/schema.sql")
        .unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    db
}

pub const SNAPSHOT: &str = "20230928";
pub const LOCATION: &str = "san antonio, tx";

const CITIES_CSV: &str = "city_id,city,state\ncity_48029,San Antonio,TX\ncity_48453,Austin,TX\n";

const LISTINGS_JSON: &str = r#"[
  {
    "zpid_norm": "1",
    "city_id": "city_48029",
    "streetAddress": "1 Alamo Plaza",
    "postal_code": "78205",
    "price": 250000,
    "fixer_upper_flag": true,
    "datePosted": "2023-09-01",
    "attributionInfo": {"agentName": "Ann Agent", "agentPhoneNumber": "210-555-0101"}
  },
  {
    "zpid_norm": "2",
    "city_id": "city_48029",
    "streetAddress": "2 River Walk",
    "price": 350000,
    "fixer_upper_flag": false,
    "datePosted": "2023-09-20",
    "attributionInfo": {"agentName": "Ann Agent", "agentPhoneNumber": "210-555-0101"}
  },
  {
    "zpid_norm": "3",
    "city_id": "city_48029",
    "streetAddress": "3 Pearl Pkwy",
    "price": 199000,
    "resoFacts": {"daysOnZillow": 5},
    "attributionInfo": {"agentName": "Bob Broker", "agentPhoneNumber": "210-555-0202"}
  },
  {
    "zpid_norm": "4",
    "city_id": "city_48029",
    "streetAddress": "4 No Agent Ln"
  }
]"#;

/// Object store holding the cities table and one San Antonio snapshot.
pub fn seeded_object_store(cfg: &AppConfig) -> MemoryObjectStore {
    let store = MemoryObjectStore::new();
    store.put(&cfg.geography_bucket, &cfg.cities_key, CITIES_CSV.as_bytes().to_vec());

    let written = Utc.with_ymd_and_hms(2023, 9, 28, 6, 0, 0).unwrap();
    store.put_at(
        &cfg.listings_bucket,
        &format!("{}/2023/09/28/{SNAPSHOT}_listings.json", cfg.listings_prefix),
        b"[]".to_vec(),
        written,
    );
    store.put(
        &cfg.listings_bucket,
        &format!("data_preparation/2023/09/28/{SNAPSHOT}_dataprep_48029_San Antonio_TX.json"),
        LISTINGS_JSON.as_bytes().to_vec(),
    );
    store
}

pub fn label_rows() -> Vec<NewSheetRow> {
    vec![
        NewSheetRow {
            property_id: "p1".into(),
            description: "Needs TLC, sold as-is".into(),
            fixer_upper_flag: "true".into(),
            ..Default::default()
        },
        NewSheetRow {
            property_id: "p2".into(),
            description: "Remodeled kitchen with new cabinets".into(),
            label_1: "updated".into(),
            label_3: "updated".into(),
            ..Default::default()
        },
    ]
}

/// A full app state over a fresh database, seeded object store and label sheet.
pub fn test_state() -> AppState {
    let cfg = AppConfig::default();
    let db = init_test_db();
    let sheets = SqliteSheetStore::new(db.clone());
    sheets
        .append_records(&cfg.label_sheet, &label_rows())
        .expect("seed label sheet");

    AppState {
        store: Box::new(seeded_object_store(&cfg)),
        sheets: Box::new(sheets),
        db,
        cfg,
    }
}
