//! Array Sections
//!
//! Local editing of row-based sections. Nothing here touches the network: rows
//! are added, edited and removed in memory, and `payload` produces the array
//! that a save sends.

use thiserror::Error;

use crate::catalog::details::DetailSection;

/// Row editing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// No row at the given position.
    #[error("row {0} does not exist")]
    OutOfRange(usize),

    /// The row type has no such field.
    #[error("unknown row field: {0}")]
    UnknownField(String),

    /// Rows of the wrong shape for this section.
    #[error("section {0} does not accept these rows")]
    WrongShape(DetailSection),
}

/// A row of an array section.
pub trait Row: Clone + Default {
    /// Editable field names.
    const FIELDS: &'static [&'static str];

    /// True when every field is empty after trimming.
    fn is_blank(&self) -> bool;

    /// Overwrite one field.
    ///
    /// # Errors
    ///
    /// Returns `RowError::UnknownField` for names outside `FIELDS`.
    fn set_field(&mut self, field: &str, value: String) -> Result<(), RowError>;
}

/// Rows to transmit for a section save.
///
/// Blank rows are dropped. If nothing survives, a single blank row is sent in
/// place of an empty array, which is the shape the backend expects.
pub fn prepare_rows<R: Row>(rows: &[R]) -> Vec<R> {
    let kept: Vec<R> = rows.iter().filter(|row| !row.is_blank()).cloned().collect();

    if kept.is_empty() {
        return vec![R::default()];
    }

    kept
}

/// In-memory editor for one array section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowsEditor<R> {
    rows: Vec<R>,
}

impl<R: Row> RowsEditor<R> {
    /// Start from the section's current rows.
    #[must_use]
    pub fn new(rows: Vec<R>) -> Self {
        Self { rows }
    }

    /// Append a blank row and return its position.
    pub fn add_item(&mut self) -> usize {
        self.rows.push(R::default());
        self.rows.len() - 1
    }

    /// Change one field of one row.
    ///
    /// # Errors
    ///
    /// Returns `RowError::OutOfRange` or `RowError::UnknownField`.
    pub fn edit_item(
        &mut self,
        index: usize,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), RowError> {
        self.rows
            .get_mut(index)
            .ok_or(RowError::OutOfRange(index))?
            .set_field(field, value.into())
    }

    /// Remove one row.
    ///
    /// # Errors
    ///
    /// Returns `RowError::OutOfRange` when there is no such row.
    pub fn delete_item(&mut self, index: usize) -> Result<R, RowError> {
        if index >= self.rows.len() {
            return Err(RowError::OutOfRange(index));
        }

        Ok(self.rows.remove(index))
    }

    /// Current rows, blanks included.
    #[must_use]
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// The array a save transmits.
    #[must_use]
    pub fn payload(&self) -> Vec<R> {
        prepare_rows(&self.rows)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::details::{KeyValue, Point};

    use super::*;

    #[test]
    fn payload_drops_blank_rows() -> TestResult {
        let mut editor = RowsEditor::new(vec![Point::new("Lightweight")]);

        let blank = editor.add_item();
        editor.edit_item(blank, "points", "   ")?;

        assert_eq!(editor.rows().len(), 2);
        assert_eq!(editor.payload(), vec![Point::new("Lightweight")]);

        Ok(())
    }

    #[test]
    fn all_blank_rows_send_one_placeholder() {
        let editor = RowsEditor::new(vec![KeyValue::default(), KeyValue::new(" ", " ")]);

        assert_eq!(editor.payload(), vec![KeyValue::default()]);
    }

    #[test]
    fn empty_section_sends_one_placeholder() {
        let editor = RowsEditor::<Point>::default();

        assert_eq!(editor.payload(), vec![Point::default()]);
    }

    #[test]
    fn partially_filled_pairs_are_kept() -> TestResult {
        let mut editor = RowsEditor::<KeyValue>::default();

        let row = editor.add_item();
        editor.edit_item(row, "value", "4 kg")?;

        assert_eq!(editor.payload(), vec![KeyValue::new("", "4 kg")]);

        Ok(())
    }

    #[test]
    fn edit_and_delete_check_bounds() {
        let mut editor = RowsEditor::<Point>::default();

        assert_eq!(
            editor.edit_item(0, "points", "x"),
            Err(RowError::OutOfRange(0))
        );
        assert_eq!(editor.delete_item(3), Err(RowError::OutOfRange(3)));
    }

    #[test]
    fn edit_rejects_unknown_fields() {
        let mut editor = RowsEditor::<Point>::default();
        let row = editor.add_item();

        assert_eq!(
            editor.edit_item(row, "colour", "red"),
            Err(RowError::UnknownField("colour".to_string()))
        );
    }

    #[test]
    fn delete_removes_row_locally() -> TestResult {
        let mut editor = RowsEditor::new(vec![Point::new("a"), Point::new("b")]);

        let removed = editor.delete_item(0)?;

        assert_eq!(removed, Point::new("a"));
        assert_eq!(editor.rows(), &[Point::new("b")]);

        Ok(())
    }
}
