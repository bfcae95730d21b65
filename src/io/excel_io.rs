use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::analysis::MonthlyRow;
use crate::error::PlannerError;

const HEADERS: [&str; 19] = [
    "month",
    "days_in_month",
    "sources",
    "documents_per_month",
    "documents_cumulative",
    "technology",
    "initiatives",
    "sessions",
    "compute_hours",
    "compute_saturation",
    "storage_gb",
    "network_gb",
    "memory_gb",
    "accelerator_hours",
    "latency_seconds",
    "alert_delay_seconds",
    "documents_per_day",
    "compute_hours_per_day",
    "network_gb_per_day",
];

/// Numeric cells of a row, in header order after the month label.
fn numeric_cells(row: &MonthlyRow) -> [Option<f64>; 18] {
    [
        Some(row.days_in_month as f64),
        Some(row.sources),
        Some(row.documents_per_month),
        Some(row.documents_cumulative),
        Some(row.technology),
        row.initiatives,
        row.sessions,
        Some(row.compute_hours),
        Some(row.compute_saturation),
        Some(row.storage_gb),
        Some(row.network_gb),
        Some(row.memory_gb),
        row.accelerator_hours,
        Some(row.latency_seconds),
        Some(row.alert_delay_seconds),
        Some(row.documents_per_day),
        Some(row.compute_hours_per_day),
        Some(row.network_gb_per_day),
    ]
}

fn fill_worksheet(worksheet: &mut Worksheet, rows: &[MonthlyRow]) -> Result<(), PlannerError> {
    worksheet.set_name("Forecast")?;
    let bold = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    worksheet.set_column_width(0, 10)?;

    for (i, row) in rows.iter().enumerate() {
        let row_idx = i as u32 + 1;
        worksheet.write_string(row_idx, 0, &row.month)?;
        for (offset, value) in numeric_cells(row).into_iter().enumerate() {
            // inactive units stay blank
            if let Some(v) = value {
                worksheet.write_number(row_idx, offset as u16 + 1, v)?;
            }
        }
    }
    Ok(())
}

/// Write the monthly forecast table to an Excel (.xlsx) file.
pub fn write_forecast_excel(
    rows: &[MonthlyRow],
    path: impl AsRef<Path>,
) -> Result<(), PlannerError> {
    let mut workbook = Workbook::new();
    fill_worksheet(workbook.add_worksheet(), rows)?;
    workbook.save(path.as_ref())?;
    Ok(())
}

/// Render the monthly forecast workbook into memory.
pub fn forecast_excel_bytes(rows: &[MonthlyRow]) -> Result<Vec<u8>, PlannerError> {
    let mut workbook = Workbook::new();
    fill_worksheet(workbook.add_worksheet(), rows)?;
    Ok(workbook.save_to_buffer()?)
}
