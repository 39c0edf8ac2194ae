//! A minimal named-column table.
//!
//! [`Frame`] is the structured table the binning transformers read from and
//! write to: an ordered list of uniquely named, equal-length [`Column`]s.
//! Continuous inputs live in `Float`/`Int` columns; binned outputs are written
//! back as `Int` levels or `Text` labels.
//!
//! # Example
//! ```
//! use featurebin::frame::{Column, Frame};
//!
//! let frame = Frame::new()
//!     .with_column("a", Column::Float(vec![1.0, 2.5, 4.0]))?
//!     .with_column("b", Column::Int(vec![3, 2, 1]))?;
//!
//! assert_eq!(frame.n_rows(), 3);
//! assert_eq!(frame.numeric("b")?, vec![3.0, 2.0, 1.0]);
//! # Ok::<(), featurebin::preprocessing::PreprocessingError>(())
//! ```

mod validation;

pub use validation::{validate_columns_present, validate_table};

use crate::preprocessing::error::PreprocessingError;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;

/// Storage for a single column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Text(Vec<String>),
}

impl Column {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Column::Float(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the column can be read as numbers.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Column::Text(_))
    }

    /// The value at `row`, or `None` when out of bounds.
    pub fn get(&self, row: usize) -> Option<Cell> {
        match self {
            Column::Float(v) => v.get(row).copied().map(Cell::Float),
            Column::Int(v) => v.get(row).copied().map(Cell::Int),
            Column::Text(v) => v.get(row).cloned().map(Cell::Text),
        }
    }

    fn dtype(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Int(_) => "int",
            Column::Text(_) => "text",
        }
    }
}

/// One element of a [`Frame`]; the element type of [`Frame::to_array`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Float(f64),
    Int(i64),
    Text(String),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Text(v) => f.write_str(v),
        }
    }
}

/// Ordered collection of uniquely named, equal-length columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Frame {
    /// Create an empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column, consuming and returning the frame.
    ///
    /// # Errors
    /// [`PreprocessingError::Validation`] if the name is already taken or the
    /// column length differs from the existing rows.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<Self, PreprocessingError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(PreprocessingError::Validation(format!(
                "duplicate column '{}'",
                name
            )));
        }
        self.check_len(&name, &column)?;
        self.names.push(name);
        self.columns.push(column);
        Ok(self)
    }

    /// Replace the column `name` in place, or append it if absent.
    pub fn set_column(
        &mut self,
        name: impl Into<String>,
        column: Column,
    ) -> Result<(), PreprocessingError> {
        let name = name.into();
        match self.position(&name) {
            Some(idx) => {
                // the replaced column is the only one when n_cols == 1
                if self.columns.len() > 1 {
                    self.check_len(&name, &column)?;
                }
                self.columns[idx] = column;
            }
            None => {
                self.check_len(&name, &column)?;
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Build a frame from a 2-D array and its column names.
    pub fn from_array<S: Into<String>>(
        data: &Array2<f64>,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self, PreprocessingError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let (_, n_cols) = data.dim();
        if names.len() != n_cols {
            return Err(PreprocessingError::InvalidShape {
                expected: format!("{} column names", n_cols),
                got: format!("{} column names", names.len()),
            });
        }

        let mut frame = Frame::new();
        for (name, col) in names.into_iter().zip(data.columns()) {
            frame = frame.with_column(name, Column::Float(col.to_vec()))?;
        }
        Ok(frame)
    }

    /// Read a frame from CSV with a header row.
    ///
    /// A column whose every field parses as `f64` becomes `Float`; any other
    /// column is kept as `Text`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PreprocessingError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for result in rdr.records() {
            let record = result?;
            for (field, col) in record.iter().zip(raw.iter_mut()) {
                col.push(field.trim().to_string());
            }
        }

        let mut frame = Frame::new();
        for (name, fields) in headers.into_iter().zip(raw) {
            let parsed: Result<Vec<f64>, _> = fields.iter().map(|f| f.parse::<f64>()).collect();
            let column = match parsed {
                Ok(values) => Column::Float(values),
                Err(_) => Column::Text(fields),
            };
            frame = frame.with_column(name, column)?;
        }
        Ok(frame)
    }

    /// Row-major raw backing array of every column.
    pub fn to_array(&self) -> Array2<Cell> {
        let (rows, cols) = (self.n_rows(), self.n_cols());
        Array2::from_shape_fn((rows, cols), |(r, c)| {
            // indices are in bounds by construction
            self.columns[c].get(r).unwrap_or(Cell::Float(f64::NAN))
        })
    }

    /// Read column `name` as `f64` values.
    ///
    /// # Errors
    /// [`PreprocessingError::MissingColumns`] if absent,
    /// [`PreprocessingError::Validation`] if the column holds text.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, PreprocessingError> {
        let column = self
            .column(name)
            .ok_or_else(|| PreprocessingError::MissingColumns {
                missing: vec![name.to_string()],
            })?;
        match column {
            Column::Float(v) => Ok(v.clone()),
            Column::Int(v) => Ok(v.iter().map(|&x| x as f64).collect()),
            Column::Text(_) => Err(PreprocessingError::Validation(format!(
                "column '{}' is not numeric (dtype {})",
                name,
                column.dtype()
            ))),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|idx| &self.columns[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Column names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn check_len(&self, name: &str, column: &Column) -> Result<(), PreprocessingError> {
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(PreprocessingError::Validation(format!(
                "column '{}' has {} rows, expected {}",
                name,
                column.len(),
                self.n_rows()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> Frame {
        Frame::new()
            .with_column("a", Column::Float(vec![1.0, 2.0, 3.0]))
            .unwrap()
            .with_column("b", Column::Int(vec![10, 20, 30]))
            .unwrap()
    }

    #[test]
    fn test_frame_shape_and_names() {
        let frame = sample();
        assert_eq!(frame.n_rows(), 3);
        assert_eq!(frame.n_cols(), 2);
        assert_eq!(frame.names(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_frame_duplicate_column_rejected() {
        let result = sample().with_column("a", Column::Float(vec![0.0; 3]));
        assert!(matches!(result, Err(PreprocessingError::Validation(_))));
    }

    #[test]
    fn test_frame_length_mismatch_rejected() {
        let result = sample().with_column("c", Column::Float(vec![0.0; 2]));
        assert!(matches!(result, Err(PreprocessingError::Validation(_))));
    }

    #[test]
    fn test_set_column_overwrites_in_place() {
        let mut frame = sample();
        frame
            .set_column("a", Column::Text(vec!["x".into(), "y".into(), "z".into()]))
            .unwrap();
        assert_eq!(frame.names(), &["a".to_string(), "b".to_string()]);
        assert!(matches!(frame.column("a"), Some(Column::Text(_))));
    }

    #[test]
    fn test_set_column_appends_new() {
        let mut frame = sample();
        frame.set_column("a_binned", Column::Int(vec![0, 1, 1])).unwrap();
        assert_eq!(frame.n_cols(), 3);
        assert_eq!(frame.names()[2], "a_binned");
    }

    #[test]
    fn test_numeric_widens_ints() {
        assert_eq!(sample().numeric("b").unwrap(), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_numeric_text_column_fails() {
        let frame = Frame::new()
            .with_column("t", Column::Text(vec!["a".into()]))
            .unwrap();
        assert!(matches!(
            frame.numeric("t"),
            Err(PreprocessingError::Validation(_))
        ));
    }

    #[test]
    fn test_numeric_missing_column_fails() {
        assert!(matches!(
            sample().numeric("zzz"),
            Err(PreprocessingError::MissingColumns { .. })
        ));
    }

    #[test]
    fn test_from_array() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let frame = Frame::from_array(&data, ["x", "y"]).unwrap();
        assert_eq!(frame.numeric("x").unwrap(), vec![1.0, 3.0, 5.0]);
        assert_eq!(frame.numeric("y").unwrap(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_from_array_name_count_mismatch() {
        let data = array![[1.0, 2.0]];
        let result = Frame::from_array(&data, ["x"]);
        assert!(matches!(
            result,
            Err(PreprocessingError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_to_array_row_major() {
        let arr = sample().to_array();
        assert_eq!(arr.dim(), (3, 2));
        assert_eq!(arr[[1, 0]], Cell::Float(2.0));
        assert_eq!(arr[[2, 1]], Cell::Int(30));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "x,y,name\n1.5,2,a\n2.5,3,b\n";
        let frame = Frame::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(frame.n_rows(), 2);
        assert_eq!(frame.numeric("x").unwrap(), vec![1.5, 2.5]);
        assert_eq!(frame.numeric("y").unwrap(), vec![2.0, 3.0]);
        assert!(matches!(frame.column("name"), Some(Column::Text(_))));
    }

    #[test]
    fn test_from_csv_ragged_rows_fail() {
        let csv = "x,y\n1,2\n3\n";
        assert!(matches!(
            Frame::from_csv_reader(csv.as_bytes()),
            Err(PreprocessingError::Csv(_))
        ));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Text("(-Inf, 3.00]".into()).to_string(), "(-Inf, 3.00]");
        assert_eq!(Cell::Int(2).to_string(), "2");
    }
}
