//! Input validation shared by every transformer that reads a [`Frame`].

use super::{Column, Frame};
use crate::preprocessing::error::PreprocessingError;

/// Validate `frame` and select the columns a transformer operates on.
///
/// Returns a private copy of the frame (callers mutate the copy, never the
/// input) together with the ordered list of selected column names: `cols`
/// when given, otherwise every column of the frame.
///
/// # Errors
/// - [`PreprocessingError::MissingColumns`] if a selected column is absent.
/// - [`PreprocessingError::Validation`] if a selected column holds text.
/// - [`PreprocessingError::NonFinite`] if `assert_all_finite` is set and a
///   selected column contains NaN or an infinity.
pub fn validate_table(
    frame: &Frame,
    cols: Option<&[String]>,
    assert_all_finite: bool,
) -> Result<(Frame, Vec<String>), PreprocessingError> {
    let selected: Vec<String> = match cols {
        Some(cols) => cols.to_vec(),
        None => frame.names().to_vec(),
    };
    validate_columns_present(&selected, frame.names())?;

    for name in &selected {
        match frame.column(name) {
            Some(Column::Float(values)) if assert_all_finite => {
                if let Some(row) = values.iter().position(|v| !v.is_finite()) {
                    return Err(PreprocessingError::NonFinite {
                        column: name.clone(),
                        row,
                    });
                }
            }
            Some(Column::Text(_)) => {
                return Err(PreprocessingError::Validation(format!(
                    "column '{}' must be numeric",
                    name
                )));
            }
            _ => {}
        }
    }

    Ok((frame.clone(), selected))
}

/// Check that every column in `required` appears in `available`.
///
/// # Errors
/// [`PreprocessingError::MissingColumns`] listing every absent column, in
/// the order they appear in `required`.
pub fn validate_columns_present(
    required: &[String],
    available: &[String],
) -> Result<(), PreprocessingError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !available.contains(c))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PreprocessingError::MissingColumns { missing })
    }
}
