use indexmap::IndexMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

/// One row of a lesson table: an ordered mapping from column name to cell text.
///
/// Column order is the order in which cells were first inserted and survives a
/// JSON round trip. Two rows are equal only if they hold the same cells in the
/// same column order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    #[serde(deserialize_with = "string_cells")]
    cells: IndexMap<String, String>,
}

/// Cells are text. JSON null reads as an empty cell; numbers, booleans and
/// nested values are rejected, since `1.10` would otherwise come back as `1.1`.
fn string_cells<'de, D: Deserializer<'de>>(deserializer: D) -> Result<IndexMap<String, String>, D::Error> {
    let cells = IndexMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(cells
        .into_iter()
        .map(|(column, value)| (column, value.unwrap_or_default()))
        .collect())
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cell stored under `column`, or None if the row has no such column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Returns true if the row has a cell for `column`, blank or not.
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Sets a cell, keeping its position if the column already exists.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Builder-style variant of [`Row::set`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.cells.len() == other.cells.len() && self.cells.iter().eq(other.cells.iter())
    }
}

impl Eq for Row {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_set_keeps_position() {
        let mut row = Row::new().with("b", "1").with("a", "2");
        row.set("b", "3");
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(row.get("b"), Some("3"));
        assert_eq!(row.get("c"), None);
        assert!(row.contains("a"));
    }

    #[test]
    fn row_equality_is_order_sensitive() {
        let ab = Row::new().with("a", "1").with("b", "2");
        let ba = Row::new().with("b", "2").with("a", "1");
        assert_ne!(ab, ba);
        assert_eq!(ab, [("a", "1"), ("b", "2")].into_iter().collect::<Row>());
    }

    #[test]
    fn row_json_preserves_column_order() {
        let json = r#"{"Lesson title":"Food","Base image":"1.1.1","Lesson level number":"A1"}"#;
        let row: Row = serde_json::from_str(json).unwrap();
        assert_eq!(
            row.columns().collect::<Vec<_>>(),
            vec!["Lesson title", "Base image", "Lesson level number"]
        );
        assert_eq!(serde_json::to_string(&row).unwrap(), json);
    }

    #[test]
    fn row_json_null_is_empty_cell() {
        let row: Row = serde_json::from_str(r#"{"a":null,"b":"x"}"#).unwrap();
        assert_eq!(row.get("a"), Some(""));
        assert_eq!(row.get("b"), Some("x"));
    }

    #[test]
    fn row_json_rejects_non_text_cells() {
        // 1.10 and 1.1 are different lesson numbers
        assert!(serde_json::from_str::<Row>(r#"{"Lesson number":1.10}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"c":true}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"c":["x"]}"#).is_err());

        let row: Row = serde_json::from_str(r#"{"Lesson number":"1.10"}"#).unwrap();
        assert_eq!(row.get("Lesson number"), Some("1.10"));
    }
}
