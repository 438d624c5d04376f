//! Numeric tables: rows of values sharing a column index.

/// Rows of equal length. A pair table has two rows, x then y.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Pair `xs` with `ys` as a two-row table.
    ///
    /// Mismatched lengths produce an empty table rather than an error; they
    /// arise naturally when one axis has data the other lacks, and callers
    /// treat an empty table as nothing to render.
    pub fn pair(xs: &[f64], ys: &[f64]) -> Self {
        if xs.len() != ys.len() {
            return Self::default();
        }
        Self {
            rows: vec![xs.to_vec(), ys.to_vec()],
        }
    }

    /// Pair `values` with a regular grid `step, 2·step, 3·step, ...`.
    pub fn scaled_index(values: &[f64], step: f64) -> Self {
        let xs: Vec<f64> = (1..=values.len()).map(|i| i as f64 * step).collect();
        Self {
            rows: vec![xs, values.to_vec()],
        }
    }

    /// A table of arbitrary rows. Rows may differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// Whether there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// First row (the x-axis of a pair table).
    pub fn xs(&self) -> Option<&[f64]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Second row (the y-axis of a pair table).
    pub fn ys(&self) -> Option<&[f64]> {
        self.rows.get(1).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_equal_lengths() {
        let table = Table::pair(&[1.0, 2.0], &[10.0, 20.0]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.xs(), Some(&[1.0, 2.0][..]));
        assert_eq!(table.ys(), Some(&[10.0, 20.0][..]));
    }

    #[test]
    fn test_pair_mismatched_lengths_is_empty() {
        let table = Table::pair(&[1.0, 2.0, 3.0], &[10.0]);
        assert!(table.is_empty());
        assert_eq!(table.xs(), None);
    }

    #[test]
    fn test_pair_of_empty_series_has_two_empty_rows() {
        let table = Table::pair(&[], &[]);
        assert!(!table.is_empty());
        assert_eq!(table.rows(), &[Vec::<f64>::new(), Vec::new()]);
    }

    #[test]
    fn test_scaled_index() {
        let table = Table::scaled_index(&[7.0, 8.0, 9.0], 0.5);
        assert_eq!(table.xs(), Some(&[0.5, 1.0, 1.5][..]));
        assert_eq!(table.ys(), Some(&[7.0, 8.0, 9.0][..]));
    }
}
