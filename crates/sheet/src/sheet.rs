use crate::a1_notation::CellIndex;
use crate::cell::CellValue;
use crate::error::{QueryError, Result};

/// A sheet representing a 2D grid of cells (row-major storage)
///
/// Rows may have different lengths.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Width of the widest row
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.data.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Check if the sheet is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a cell value by row and column index (0-based)
    pub fn get(&self, row: usize, col: usize) -> Result<&CellValue> {
        self.data
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or_else(|| QueryError::out_of_range(&self.name, row, col))
    }

    /// Get an entire row by index (0-based)
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[CellValue]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Every position holding a value equal to `target`, in row-major order
    #[must_use]
    pub fn find(&self, target: &CellValue) -> Vec<CellIndex> {
        self.data
            .iter()
            .enumerate()
            .flat_map(|(row_idx, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, value)| value.matches(target))
                    .map(move |(col_idx, _)| (row_idx, col_idx))
            })
            .collect()
    }

    /// Get internal data reference
    #[must_use]
    pub fn data(&self) -> &Vec<Vec<CellValue>> {
        &self.data
    }

    /// Get mutable internal data reference
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data() {
        let sheet = Sheet::from_data(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.get(1, 2).unwrap(), &CellValue::Int(6));
    }

    #[test]
    fn test_ragged_dimensions() {
        let sheet = Sheet::from_data(vec![vec!["a"], vec!["b", "c", "d"], vec![]]);
        assert_eq!(sheet.row_count(), 3);
        assert_eq!(sheet.col_count(), 3);
        assert_eq!(sheet.row(2), Some(&[][..]));
        assert!(sheet.get(0, 1).is_err());
        assert_eq!(sheet.get(1, 2).unwrap().as_str(), "d");
    }

    #[test]
    fn test_get_out_of_range_reports_position() {
        let mut sheet = Sheet::from_data(vec![vec![1]]);
        sheet.set_name("Data");
        let err = sheet.get(3, 4).unwrap_err();
        assert!(matches!(
            err,
            QueryError::IndexOutOfRange { ref sheet, row: 3, col: 4 } if sheet == "Data"
        ));
    }

    #[test]
    fn test_find_row_major() {
        let sheet = Sheet::from_data(vec![vec!["x", "y"], vec!["y", "x"], vec!["x"]]);
        assert_eq!(
            sheet.find(&CellValue::from("x")),
            vec![(0, 0), (1, 1), (2, 0)]
        );
        assert!(sheet.find(&CellValue::from("z")).is_empty());
    }

    #[test]
    fn test_empty_sheet() {
        let sheet = Sheet::new();
        assert!(sheet.is_empty());
        assert_eq!(sheet.col_count(), 0);
        assert_eq!(sheet.name(), "Sheet1");
    }
}
