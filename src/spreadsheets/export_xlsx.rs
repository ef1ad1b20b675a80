use crate::errors::ServerError;
use crate::listings::{AgentRow, AGENT_COLUMNS};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

/// The ranked agent table as an .xlsx workbook, same columns as the CSV.
pub fn agents_xlsx(rows: &[AgentRow]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in AGENT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, row) in rows.iter().enumerate() {
        write_agent_row(worksheet, (i + 1) as u32, row)
            .map_err(|e| ServerError::XlsxError(format!("Failed to write row {}: {}", i + 1, e)))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

fn write_agent_row(ws: &mut Worksheet, r: u32, row: &AgentRow) -> Result<(), XlsxError> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    ws.write_string(r, 0, &row.agent_first_name)?;
    ws.write_string(r, 1, &row.agent_name)?;
    ws.write_string(r, 2, &row.agent_phone_number)?;
    ws.write_string(r, 3, text(&row.agent_email))?;
    if let Some(days) = row.days_on_zillow {
        ws.write_number(r, 4, days as f64)?;
    }
    ws.write_number(r, 5, row.total_listings as f64)?;
    ws.write_string(r, 6, text(&row.street_address))?;
    ws.write_string(r, 7, text(&row.city))?;
    ws.write_string(r, 8, text(&row.state))?;
    ws.write_string(r, 9, text(&row.city_id))?;
    ws.write_string(r, 10, text(&row.zpid_norm))?;
    ws.write_string(r, 11, text(&row.listing_link))?;
    ws.write_string(r, 12, text(&row.agent_profile_url))?;
    Ok(())
}
