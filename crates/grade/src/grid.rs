// CSV -> grid

use crate::cell::CellValue;
use crate::error::GradeError;
use crate::model::Grid;

/// Read CSV text into a grid. Row 0 stays the header row; ragged rows are kept
/// as-is and blank cells become `Empty`.
pub fn load_csv_grid(csv_data: &str) -> Result<Grid, GradeError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| GradeError::Io(e.to_string()))?;
        grid.push(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(field.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(grid)
}
