// src/db/label_sheet.rs
//
// The labeling "spreadsheet": addressed by sheet name, 1-based row and column,
// with row 1 reserved for the header.

use rusqlite::{params, OptionalExtension};
use serde::Deserialize;
use std::fs::File;
use tracing::info;

use crate::db::connection::Database;
use crate::errors::ServerError;

/// Header row, in column order (column 1 = property_id).
pub const SHEET_COLUMNS: [&str; 6] = [
    "property_id",
    "description",
    "fixer_upper_flag",
    "label_1",
    "label_2",
    "label_3",
];

const FIRST_DATA_ROW: u32 = 2;
const FIRST_LABEL_COLUMN: usize = 4;

/// Sheet column holding the votes of annotator `slot` (0..3).
pub fn label_column(slot: usize) -> Result<usize, ServerError> {
    if slot < 3 {
        Ok(FIRST_LABEL_COLUMN + slot)
    } else {
        Err(ServerError::BadRequest(format!("no label column for annotator {slot}")))
    }
}

/// One data row as stored, cells as raw strings.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRecord {
    pub row: u32,
    pub property_id: String,
    pub description: String,
    pub fixer_upper_flag: String,
    pub labels: [String; 3],
}

/// A row to append; also the CSV seed format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewSheetRow {
    pub property_id: String,
    pub description: String,
    pub fixer_upper_flag: String,
    pub label_1: String,
    pub label_2: String,
    pub label_3: String,
}

pub trait SpreadsheetStore {
    fn read_all_records(&self, sheet: &str) -> Result<Vec<SheetRecord>, ServerError>;

    fn update_cell(&self, sheet: &str, row: u32, col: usize, value: &str) -> Result<(), ServerError>;

    /// Appends below the last row; returns the first new row number.
    fn append_records(&self, sheet: &str, rows: &[NewSheetRow]) -> Result<u32, ServerError>;
}

pub struct SqliteSheetStore {
    db: Database,
}

impl SqliteSheetStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl SpreadsheetStore for SqliteSheetStore {
    fn read_all_records(&self, sheet: &str) -> Result<Vec<SheetRecord>, ServerError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                select row_num, property_id, description, fixer_upper_flag,
                       label_1, label_2, label_3
                from sheet_rows
                where sheet = ?1
                order by row_num
                "#,
            )?;

            let rows = stmt.query_map(params![sheet], |row| {
                Ok(SheetRecord {
                    row: row.get(0)?,
                    property_id: row.get(1)?,
                    description: row.get(2)?,
                    fixer_upper_flag: row.get(3)?,
                    labels: [row.get(4)?, row.get(5)?, row.get(6)?],
                })
            })?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r?);
            }
            Ok(out)
        })
    }

    fn update_cell(&self, sheet: &str, row: u32, col: usize, value: &str) -> Result<(), ServerError> {
        if row < FIRST_DATA_ROW {
            return Err(ServerError::BadRequest("the header row is read-only".into()));
        }
        // Column names come from the fixed header, never from input.
        let column = col
            .checked_sub(1)
            .and_then(|i| SHEET_COLUMNS.get(i))
            .ok_or_else(|| ServerError::BadRequest(format!("no column {col}")))?;

        let changed = self.db.with_conn(|conn| {
            let sql = format!("update sheet_rows set {column} = ?1 where sheet = ?2 and row_num = ?3");
            Ok(conn.execute(&sql, params![value, sheet, row])?)
        })?;

        if changed == 0 {
            return Err(ServerError::NotFound);
        }
        Ok(())
    }

    fn append_records(&self, sheet: &str, rows: &[NewSheetRow]) -> Result<u32, ServerError> {
        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;

            let last: Option<u32> = tx
                .query_row(
                    "select max(row_num) from sheet_rows where sheet = ?1",
                    params![sheet],
                    |r| r.get(0),
                )
                .optional()?
                .flatten();
            let first = last.map(|n| n + 1).unwrap_or(FIRST_DATA_ROW);

            for (i, r) in rows.iter().enumerate() {
                tx.execute(
                    r#"
                    insert into sheet_rows
                        (sheet, row_num, property_id, description, fixer_upper_flag,
                         label_1, label_2, label_3)
                    values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                    params![
                        sheet,
                        first + i as u32,
                        r.property_id,
                        r.description,
                        r.fixer_upper_flag,
                        r.label_1,
                        r.label_2,
                        r.label_3
                    ],
                )?;
            }

            tx.commit()?;
            Ok(first)
        })
    }
}

/// Loads `csv_path` into `sheet` when the sheet has no rows yet.
pub fn seed_sheet_from_csv(
    store: &dyn SpreadsheetStore,
    sheet: &str,
    csv_path: &str,
) -> Result<usize, ServerError> {
    if !store.read_all_records(sheet)?.is_empty() {
        return Ok(0);
    }

    let file = File::open(csv_path)
        .map_err(|e| ServerError::CsvError(format!("open {csv_path}: {e}")))?;
    let rows = parse_seed_rows(file)?;
    store.append_records(sheet, &rows)?;

    info!(sheet, rows = rows.len(), path = csv_path, "label sheet seeded");
    Ok(rows.len())
}

pub fn parse_seed_rows<R: std::io::Read>(reader: R) -> Result<Vec<NewSheetRow>, ServerError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for row in reader.deserialize::<NewSheetRow>() {
        let row = row?;
        if !row.property_id.trim().is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}
