//! The translation matrix: (row, language) → translated string.
//!
//! Rows are the fragment index domain `[0, N)` plus the fixed meta-field keys,
//! kept as a parallel table because meta rows are keyed by name rather than
//! position. Columns are the ordered list of configured target languages.
//!
//! The matrix is the only stateful entity that crosses the extraction /
//! reconstruction boundary: it is created empty, filled cell by cell (by a
//! provider or by external edits), persisted, and read back for rendering.
//! Cells are write-once in practice but nothing enforces that; overwriting is
//! allowed for re-fills.

use serde::{Deserialize, Serialize};

use crate::{Result, TraductoError};

/// Rectangular table of translations for one prepared document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationMatrix {
    languages: Vec<String>,
    /// `cells[row][col]`: fragment rows in index order.
    cells: Vec<Vec<String>>,
    /// Meta rows keyed by field name, same column order.
    meta_cells: Vec<(String, Vec<String>)>,
}

impl TranslationMatrix {
    /// Create an empty matrix for the given languages and row domain.
    ///
    /// All cells start as empty strings, the explicit "unset" value.
    pub fn new(languages: Vec<String>, fragment_rows: usize, meta_keys: &[&str]) -> Self {
        let width = languages.len();
        Self {
            languages,
            cells: vec![vec![String::new(); width]; fragment_rows],
            meta_cells: meta_keys
                .iter()
                .map(|key| (key.to_string(), vec![String::new(); width]))
                .collect(),
        }
    }

    /// The ordered target-language column set.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Number of fragment rows.
    pub fn fragment_rows(&self) -> usize {
        self.cells.len()
    }

    /// The meta row keys, in insertion order.
    pub fn meta_keys(&self) -> Vec<&str> {
        self.meta_cells.iter().map(|(key, _)| key.as_str()).collect()
    }

    fn lang_index(&self, lang: &str) -> Option<usize> {
        self.languages.iter().position(|l| l == lang)
    }

    /// Get a fragment cell. `None` when the row or language is unknown.
    pub fn get(&self, row: usize, lang: &str) -> Option<&str> {
        let col = self.lang_index(lang)?;
        self.cells.get(row).map(|r| r[col].as_str())
    }

    /// Set a fragment cell. Returns false when the row or language is
    /// unknown; the matrix shape never grows on write.
    pub fn set(&mut self, row: usize, lang: &str, value: String) -> bool {
        let Some(col) = self.lang_index(lang) else {
            return false;
        };
        match self.cells.get_mut(row) {
            Some(r) => {
                r[col] = value;
                true
            }
            None => false,
        }
    }

    /// Get a meta cell by field key.
    pub fn get_meta(&self, key: &str, lang: &str) -> Option<&str> {
        let col = self.lang_index(lang)?;
        self.meta_cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, row)| row[col].as_str())
    }

    /// Set a meta cell by field key. Returns false when the key or language
    /// is unknown.
    pub fn set_meta(&mut self, key: &str, lang: &str, value: String) -> bool {
        let Some(col) = self.lang_index(lang) else {
            return false;
        };
        match self.meta_cells.iter_mut().find(|(k, _)| k == key) {
            Some((_, row)) => {
                row[col] = value;
                true
            }
            None => false,
        }
    }

    /// Extract one language's fragment column, in fragment-index order.
    ///
    /// This is the shape [`crate::reconstruct::reconstruct`] consumes.
    pub fn column(&self, lang: &str) -> Option<Vec<String>> {
        let col = self.lang_index(lang)?;
        Some(self.cells.iter().map(|row| row[col].clone()).collect())
    }

    /// Export the fragment table in the row-major interchange shape:
    /// row 0 = language codes, subsequent rows = one fragment's translations
    /// per language, in fragment-index order.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(self.cells.len() + 1);
        rows.push(self.languages.clone());
        rows.extend(self.cells.iter().cloned());
        rows
    }

    /// Import a matrix from the row-major interchange shape.
    ///
    /// The imported matrix has no meta rows; meta travels separately.
    ///
    /// # Errors
    ///
    /// Returns [`TraductoError::MatrixShape`] when the header row is missing
    /// or any data row's width differs from the language count.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self> {
        let mut iter = rows.into_iter();
        let languages = iter
            .next()
            .ok_or_else(|| TraductoError::MatrixShape("missing language header row".to_string()))?;

        let width = languages.len();
        let mut cells = Vec::new();
        for (i, row) in iter.enumerate() {
            if row.len() != width {
                return Err(TraductoError::MatrixShape(format!(
                    "row {} has {} cells, expected {}",
                    i + 1,
                    row.len(),
                    width
                )));
            }
            cells.push(row);
        }

        Ok(Self { languages, cells, meta_cells: Vec::new() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs() -> Vec<String> {
        vec!["FR".to_string(), "NL".to_string()]
    }

    #[test]
    fn test_new_matrix_is_empty() {
        let matrix = TranslationMatrix::new(langs(), 3, &["title"]);

        assert_eq!(matrix.fragment_rows(), 3);
        assert_eq!(matrix.languages(), &["FR".to_string(), "NL".to_string()]);
        assert_eq!(matrix.get(0, "FR"), Some(""));
        assert_eq!(matrix.get_meta("title", "NL"), Some(""));
    }

    #[test]
    fn test_set_and_get() {
        let mut matrix = TranslationMatrix::new(langs(), 2, &[]);

        assert!(matrix.set(1, "NL", "hallo".to_string()));
        assert_eq!(matrix.get(1, "NL"), Some("hallo"));
        assert_eq!(matrix.get(1, "FR"), Some(""));
    }

    #[test]
    fn test_unknown_row_or_language() {
        let mut matrix = TranslationMatrix::new(langs(), 1, &[]);

        assert!(!matrix.set(5, "FR", "x".to_string()));
        assert!(!matrix.set(0, "DE", "x".to_string()));
        assert_eq!(matrix.get(5, "FR"), None);
        assert_eq!(matrix.get(0, "DE"), None);
    }

    #[test]
    fn test_meta_rows() {
        let mut matrix = TranslationMatrix::new(langs(), 0, &["title", "meta-description"]);

        assert!(matrix.set_meta("title", "FR", "Titre".to_string()));
        assert_eq!(matrix.get_meta("title", "FR"), Some("Titre"));
        assert!(!matrix.set_meta("meta-keywords", "FR", "x".to_string()));
        assert_eq!(matrix.meta_keys(), vec!["title", "meta-description"]);
    }

    #[test]
    fn test_column_extraction() {
        let mut matrix = TranslationMatrix::new(langs(), 2, &[]);
        matrix.set(0, "FR", "un".to_string());
        matrix.set(1, "FR", "deux".to_string());

        assert_eq!(matrix.column("FR"), Some(vec!["un".to_string(), "deux".to_string()]));
        assert_eq!(matrix.column("DE"), None);
    }

    #[test]
    fn test_rows_round_trip() {
        let mut matrix = TranslationMatrix::new(langs(), 2, &[]);
        matrix.set(0, "FR", "un".to_string());
        matrix.set(1, "NL", "twee".to_string());

        let rows = matrix.to_rows();
        assert_eq!(rows[0], vec!["FR".to_string(), "NL".to_string()]);
        assert_eq!(rows.len(), 3);

        let imported = TranslationMatrix::from_rows(rows).unwrap();
        assert_eq!(imported.get(0, "FR"), Some("un"));
        assert_eq!(imported.get(1, "NL"), Some("twee"));
    }

    #[test]
    fn test_from_rows_rejects_ragged_table() {
        let rows = vec![
            vec!["FR".to_string(), "NL".to_string()],
            vec!["un".to_string()],
        ];

        assert!(matches!(
            TranslationMatrix::from_rows(rows),
            Err(TraductoError::MatrixShape(_))
        ));
    }

    #[test]
    fn test_from_rows_rejects_empty_table() {
        assert!(matches!(
            TranslationMatrix::from_rows(Vec::new()),
            Err(TraductoError::MatrixShape(_))
        ));
    }
}
