// src/labeling/writer.rs

use tracing::info;

use crate::db::label_sheet::{label_column, SpreadsheetStore};
use crate::errors::ServerError;
use crate::labeling::session::SessionContext;
use crate::labeling::{LabeledRecord, LABEL_OPTIONS};

/// Writes the session annotator's vote into their column of the record's row,
/// then notes the record as labeled in this session.
///
/// The sheet write is a single cell update; the caller persists the session
/// change afterwards, so a failure between the two leaves them out of step.
pub fn write_label(
    store: &dyn SpreadsheetStore,
    sheet: &str,
    record: &LabeledRecord,
    session: &mut SessionContext,
    label: &str,
) -> Result<(), ServerError> {
    let label = label.trim();
    if !LABEL_OPTIONS.contains(&label) {
        return Err(ServerError::BadRequest(format!("unknown label: {label}")));
    }

    let slot = session.annotator.slot;
    if record.vote(slot).is_some() {
        return Err(ServerError::BadRequest(format!(
            "{} already labeled {}",
            session.annotator.name, record.property_id
        )));
    }

    store.update_cell(sheet, record.row, label_column(slot)?, label)?;
    session.labeled_ids.push(record.property_id.clone());

    info!(
        annotator = %session.annotator.name,
        property_id = %record.property_id,
        row = record.row,
        label,
        "label written"
    );
    Ok(())
}
