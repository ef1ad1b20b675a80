use crate::errors::ServerError;
use crate::listings::AgentRow;

/// UTF-8 CSV of the ranked agent table: header row, fixed column order.
pub fn agents_csv(rows: &[AgentRow]) -> Result<Vec<u8>, ServerError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    if rows.is_empty() {
        // serde only emits the header alongside the first record
        writer.write_record(crate::listings::AGENT_COLUMNS)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ServerError::CsvError(format!("Failed to flush CSV: {e}")))
}
