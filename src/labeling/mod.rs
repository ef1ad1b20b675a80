//! Manual labeling tool: consensus over three annotators' votes, the order
//! records are shown in, description highlighting, and reporting.

pub mod annotator;
pub mod classifier;
pub mod metrics;
pub mod priority;
pub mod session;
pub mod writer;

pub use classifier::{classify, Consensus};
pub use session::{Annotator, SessionContext};

use crate::db::label_sheet::SheetRecord;

/// Labels an annotator can choose from.
pub const LABEL_OPTIONS: [&str; 3] = ["distressed", "maintained", "updated"];

/// A sheet row with its consensus fields derived from the current votes.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRecord {
    /// Sheet row number (the header is row 1).
    pub row: u32,
    pub property_id: String,
    pub description: String,
    pub fixer_upper_flag: bool,
    pub votes: [Option<String>; 3],
    pub consensus: Consensus,
}

impl LabeledRecord {
    pub fn new(
        row: u32,
        property_id: String,
        description: String,
        fixer_upper_flag: bool,
        votes: [Option<String>; 3],
    ) -> Self {
        let consensus = classify(&votes);
        Self {
            row,
            property_id,
            description,
            fixer_upper_flag,
            votes,
            consensus,
        }
    }

    pub fn from_sheet(r: SheetRecord) -> Self {
        let fixer = matches!(
            r.fixer_upper_flag.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        );
        let votes = r
            .labels
            .map(|v| Some(v.trim().to_string()).filter(|v| !v.is_empty()));
        Self::new(r.row, r.property_id, r.description, fixer, votes)
    }

    /// The non-blank vote in `slot`, if any.
    pub fn vote(&self, slot: usize) -> Option<&str> {
        self.votes
            .get(slot)
            .and_then(|v| v.as_deref())
            .filter(|v| !v.trim().is_empty())
    }
}

/// RecordLoader: every sheet row, consensus recomputed on each load.
pub fn load_records(
    store: &dyn crate::db::label_sheet::SpreadsheetStore,
    sheet: &str,
) -> Result<Vec<LabeledRecord>, crate::errors::ServerError> {
    Ok(store
        .read_all_records(sheet)?
        .into_iter()
        .map(LabeledRecord::from_sheet)
        .collect())
}
