// src/config.rs
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
    #[error("LABEL_ANNOTATORS must name exactly three annotators, got {0}")]
    AnnotatorCount(usize),
    #[error("LABEL_ANNOTATORS lists {0} more than once")]
    DuplicateAnnotator(String),
}

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub database_path: String,
    pub schema_path: String,

    // Object store layout
    pub object_store_root: String,
    pub listings_bucket: String,
    pub listings_prefix: String,
    pub geography_bucket: String,
    pub cities_key: String,
    pub listing_link_base: String,

    // Labeling tool
    pub label_sheet: String,
    pub annotators: [String; 3],
    pub label_seed_csv: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            database_path: "listing_dashboards.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            object_store_root: "data".to_string(),
            listings_bucket: "residentialpropertydata".to_string(),
            listings_prefix: "api/rapid_api/zillow/property_listings".to_string(),
            geography_bucket: "geographydata".to_string(),
            cities_key: "active_zip_city_state.csv".to_string(),
            listing_link_base: "https://www.coffeeclozers.com/properties".to_string(),
            label_sheet: "labels".to_string(),
            annotators: [
                "annotator_1".to_string(),
                "annotator_2".to_string(),
                "annotator_3".to_string(),
            ],
            label_seed_csv: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is normal outside local dev.
        let _ = dotenvy::dotenv();

        let mut cfg = AppConfig::default();

        if let Some(v) = var("BIND_ADDR") {
            cfg.bind_addr = v.parse().map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: v.clone(),
            })?;
        }
        if let Some(v) = var("MAX_WORKERS") {
            cfg.max_workers = v
                .parse()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "MAX_WORKERS",
                    value: v.clone(),
                })?;
        }

        override_string(&mut cfg.database_path, "DATABASE_PATH");
        override_string(&mut cfg.schema_path, "SCHEMA_PATH");
        override_string(&mut cfg.object_store_root, "OBJECT_STORE_ROOT");
        override_string(&mut cfg.listings_bucket, "LISTINGS_BUCKET");
        override_string(&mut cfg.listings_prefix, "LISTINGS_PREFIX");
        override_string(&mut cfg.geography_bucket, "GEOGRAPHY_BUCKET");
        override_string(&mut cfg.cities_key, "CITIES_KEY");
        override_string(&mut cfg.listing_link_base, "LISTING_LINK_BASE");
        override_string(&mut cfg.label_sheet, "LABEL_SHEET");

        if let Some(v) = var("LABEL_ANNOTATORS") {
            cfg.annotators = parse_annotators(&v)?;
        }
        cfg.label_seed_csv = var("LABEL_SEED_CSV");

        Ok(cfg)
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn override_string(slot: &mut String, key: &str) {
    if let Some(v) = var(key) {
        *slot = v;
    }
}

/// "a, b ,c" -> ["a", "b", "c"]
pub fn parse_annotators(raw: &str) -> Result<[String; 3], ConfigError> {
    let names: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    // Each name maps to its own vote column.
    if let Some(dup) = names
        .iter()
        .enumerate()
        .find_map(|(i, n)| names[..i].contains(n).then(|| n.clone()))
    {
        return Err(ConfigError::DuplicateAnnotator(dup));
    }

    match <[String; 3]>::try_from(names) {
        Ok(arr) => Ok(arr),
        Err(names) => Err(ConfigError::AnnotatorCount(names.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotators_are_trimmed() {
        let names = parse_annotators(" ana, ben ,cy ").unwrap();
        assert_eq!(names, ["ana", "ben", "cy"]);
    }

    #[test]
    fn annotators_need_three_names() {
        assert!(matches!(
            parse_annotators("ana,ben"),
            Err(ConfigError::AnnotatorCount(2))
        ));
        assert!(matches!(
            parse_annotators("a,b,c,d"),
            Err(ConfigError::AnnotatorCount(4))
        ));
    }

    #[test]
    fn annotator_names_must_be_distinct() {
        assert!(matches!(
            parse_annotators("ana, ana ,cy"),
            Err(ConfigError::DuplicateAnnotator(name)) if name == "ana"
        ));
    }
}
