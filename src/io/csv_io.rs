use std::path::Path;

use crate::analysis::MonthlyRow;
use crate::error::PlannerError;

fn write_rows<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    rows: &[MonthlyRow],
) -> Result<(), PlannerError> {
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the monthly forecast table to a CSV file.
///
/// Columns of inactive planning units are written empty.
pub fn write_forecast_csv(rows: &[MonthlyRow], path: impl AsRef<Path>) -> Result<(), PlannerError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    write_rows(&mut wtr, rows)
}

/// Render the monthly forecast table as CSV bytes.
pub fn forecast_csv_bytes(rows: &[MonthlyRow]) -> Result<Vec<u8>, PlannerError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_rows(&mut wtr, rows)?;
    wtr.into_inner()
        .map_err(|e| PlannerError::Io(std::io::Error::other(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::run_forecast;
    use crate::models::{Scenario, Variant};

    #[test]
    fn test_csv_header_and_row_count() {
        let rows = run_forecast(&Scenario::default()).unwrap().rows();
        let bytes = forecast_csv_bytes(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("month,days_in_month,sources,documents_per_month"));
        assert!(header.ends_with("compute_hours_per_day,network_gb_per_day"));
        assert_eq!(lines.count(), 25);
    }

    #[test]
    fn test_csv_reduced_leaves_blank_columns() {
        let rows = run_forecast(&Scenario::for_variant(Variant::Reduced))
            .unwrap()
            .rows();
        let text = String::from_utf8(forecast_csv_bytes(&rows).unwrap()).unwrap();
        let first = text.lines().nth(1).unwrap();
        assert!(first.starts_with("2025-12,31,300.0,18000.0,"));
        assert!(first.contains(",,"));
    }

    #[test]
    fn test_write_csv_file() {
        let rows = run_forecast(&Scenario::default()).unwrap().rows();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.csv");
        write_forecast_csv(&rows, &path).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let loaded: Vec<MonthlyRow> = rdr.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(loaded.len(), 25);
        assert_eq!(loaded[0].month, "2025-12");
        assert_eq!(loaded[0].sources, 300.0);
        assert_eq!(loaded[0].sessions, rows[0].sessions);
    }
}
