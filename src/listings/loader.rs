// src/listings/loader.rs

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::errors::ServerError;
use crate::listings::agents::id_suffix;
use crate::listings::days_on_market::parse_snapshot_date;
use crate::listings::models::Listing;
use crate::storage::{latest_object, ObjectStore};

/// A row of the active-cities reference table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct City {
    pub city_id: String,
    pub city: String,
    pub state: String,
}

impl City {
    /// Selector label, e.g. "san antonio, tx".
    pub fn location_name(&self) -> String {
        format!("{}, {}", self.city.to_lowercase(), self.state.to_lowercase())
    }
}

pub fn load_cities(store: &dyn ObjectStore, bucket: &str, key: &str) -> Result<Vec<City>, ServerError> {
    let bytes = store.get(bucket, key)?;
    parse_cities(&bytes)
}

pub fn parse_cities(bytes: &[u8]) -> Result<Vec<City>, ServerError> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut cities = Vec::new();
    for row in reader.deserialize() {
        cities.push(row?);
    }
    Ok(cities)
}

pub fn find_city<'a>(cities: &'a [City], location_name: &str) -> Option<&'a City> {
    let wanted = location_name.trim().to_lowercase();
    cities.iter().find(|c| c.location_name() == wanted)
}

/// Snapshot date of the most recently written listings object: the last path
/// segment up to its first `_`, e.g. `.../20230928_listings.json`.
pub fn latest_snapshot_date(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: &str,
) -> Result<(String, NaiveDate), ServerError> {
    let latest = latest_object(store, bucket, prefix)?.ok_or_else(|| {
        ServerError::Storage(format!("no listing snapshots under {bucket}/{prefix}"))
    })?;

    let file_name = latest.key.rsplit('/').next().unwrap_or(&latest.key);
    let raw = file_name.split('_').next().unwrap_or(file_name).to_string();
    let date = parse_snapshot_date(&raw)?;

    debug!(key = %latest.key, snapshot = %raw, "latest listings snapshot");
    Ok((raw, date))
}

/// `data_preparation/YYYY/MM/DD/<date>_dataprep_<id>_<city>_<state>.json`
pub fn snapshot_key(snapshot: &str, city: &City) -> String {
    let year = snapshot.get(..4).unwrap_or_default();
    let month = snapshot.get(4..6).unwrap_or_default();
    let day = snapshot.get(6..).unwrap_or_default();
    format!(
        "data_preparation/{year}/{month}/{day}/{snapshot}_dataprep_{}_{}_{}.json",
        id_suffix(&city.city_id),
        city.city,
        city.state
    )
}

pub fn load_listings(store: &dyn ObjectStore, bucket: &str, key: &str) -> Result<Vec<Listing>, ServerError> {
    let bytes = store.get(bucket, key)?;
    parse_listings(&bytes)
}

/// Accepts a records array or a column-oriented object
/// (`{column: {index: value}}`), optionally wrapped in one more layer of
/// JSON string encoding.
pub fn parse_listings(bytes: &[u8]) -> Result<Vec<Listing>, ServerError> {
    let mut value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ServerError::Parse(format!("listings snapshot is not JSON: {e}")))?;

    if let Value::String(inner) = value {
        value = serde_json::from_str(&inner)
            .map_err(|e| ServerError::Parse(format!("listings snapshot payload is not JSON: {e}")))?;
    }

    let records = match value {
        Value::Array(records) => records,
        Value::Object(columns) => columns_to_records(columns)?,
        _ => {
            return Err(ServerError::Parse(
                "listings snapshot must be an array or an object of columns".into(),
            ))
        }
    };

    records
        .into_iter()
        .map(|r| {
            serde_json::from_value(r)
                .map_err(|e| ServerError::Parse(format!("listing record: {e}")))
        })
        .collect()
}

fn columns_to_records(columns: Map<String, Value>) -> Result<Vec<Value>, ServerError> {
    // Row index -> record, ordered numerically when the index is numeric.
    let mut rows: Vec<(String, Map<String, Value>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (column, cells) in columns {
        let Value::Object(cells) = cells else {
            return Err(ServerError::Parse(format!(
                "column '{column}' is not an index -> value object"
            )));
        };
        for (index, cell) in cells {
            match positions.get(&index) {
                Some(&pos) => {
                    rows[pos].1.insert(column.clone(), cell);
                }
                None => {
                    let mut record = Map::new();
                    record.insert(column.clone(), cell);
                    positions.insert(index.clone(), rows.len());
                    rows.push((index, record));
                }
            }
        }
    }

    rows.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    });

    Ok(rows.into_iter().map(|(_, r)| Value::Object(r)).collect())
}
