use crate::table::column::ColumnGrammar;
use crate::table::column::ColumnRole;
use crate::table::row::Row;
use crate::table::Table;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::warn;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReorderError {
    #[error("Row {row} does not match the column set of the first row (missing: {missing:?}, extra: {extra:?})")]
    HeterogeneousSchema {
        row: usize,
        missing: Vec<String>,
        extra: Vec<String>,
    },
}

/// How the column set of a table is determined before reordering.
///
/// Tables are edited by hand, so rows do not always share the same columns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaPolicy {
    /// Columns of the first row only; columns that appear only in later rows are dropped
    FirstRow,
    /// Union of the columns of all rows, in first-seen order
    Union,
    /// Every row must carry exactly the columns of the first row
    #[default]
    Strict,
}

/// Rebuilds tables under a canonical column order: the fixed fields, then
/// unrecognized columns in first-seen order, then one group per language in
/// order of discovery (number, word, gendered forms, plural).
pub struct Reorderer<'a> {
    grammar: &'a ColumnGrammar,
    policy: SchemaPolicy,
}

impl<'a> Reorderer<'a> {
    pub fn new(grammar: &'a ColumnGrammar, policy: SchemaPolicy) -> Self {
        Self { grammar, policy }
    }

    /// Returns a new table with every row rebuilt in canonical column order.
    /// Absent cells are written as empty strings, so all rows end up the same width.
    pub fn reorder(&self, table: &Table) -> Result<Table, ReorderError> {
        if table.is_empty() {
            return Ok(table.clone());
        }
        let order = self.column_order(table)?;
        let data = table
            .data
            .iter()
            .map(|row| {
                order
                    .iter()
                    .map(|column| (column.as_str(), row.get(column).unwrap_or_default()))
                    .collect::<Row>()
            })
            .collect();
        debug!(table = %table.name, columns = order.len(), rows = table.len(), "Reordered table columns");
        Ok(Table {
            name: table.name.clone(),
            data,
        })
    }

    /// Canonical column order for a table, honouring the schema policy.
    pub fn column_order(&self, table: &Table) -> Result<Vec<String>, ReorderError> {
        let columns = self.column_set(table)?;
        Ok(self.canonical_order(&columns))
    }

    fn column_set<'t>(&self, table: &'t Table) -> Result<Vec<&'t str>, ReorderError> {
        let first = table.first_row_columns();
        match self.policy {
            SchemaPolicy::Union => Ok(table.all_columns().into_iter().collect()),
            SchemaPolicy::FirstRow => {
                let dropped: Vec<&str> = table
                    .all_columns()
                    .into_iter()
                    .filter(|column| !first.contains(column))
                    .collect();
                if !dropped.is_empty() {
                    warn!(table = %table.name, ?dropped, "Dropping columns missing from the first row");
                }
                Ok(first)
            }
            SchemaPolicy::Strict => {
                for (index, row) in table.data.iter().enumerate().skip(1) {
                    let missing: Vec<String> = first
                        .iter()
                        .filter(|column| !row.contains(column))
                        .map(|column| column.to_string())
                        .collect();
                    let extra: Vec<String> = row
                        .columns()
                        .filter(|column| !first.contains(column))
                        .map(str::to_owned)
                        .collect();
                    if !missing.is_empty() || !extra.is_empty() {
                        Err(ReorderError::HeterogeneousSchema {
                            row: index,
                            missing,
                            extra,
                        })?;
                    }
                }
                Ok(first)
            }
        }
    }

    fn canonical_order(&self, columns: &[&str]) -> Vec<String> {
        let mut base: [Option<&str>; ColumnRole::BASE.len()] = Default::default();
        let mut other: IndexSet<&str> = IndexSet::new();
        // language -> (rank inside the group, column), languages in order of discovery
        let mut groups: IndexMap<&str, Vec<(usize, &str)>> = IndexMap::new();

        for &column in columns {
            let (role, language) = self.grammar.resolve(column);
            match (role, language) {
                (ColumnRole::Translation { form, .. }, Some(language)) => {
                    groups.entry(language).or_default().push((form.rank(), column));
                }
                (role, _) => match role.base_rank() {
                    Some(rank) => base[rank] = Some(column),
                    None => {
                        other.insert(column);
                    }
                },
            }
        }

        let mut order: Vec<String> = base.into_iter().flatten().map(str::to_owned).collect();
        order.extend(other.into_iter().map(str::to_owned));
        for (_, mut group) in groups {
            // stable: equal ranks keep first-seen order
            group.sort_by_key(|(rank, _)| *rank);
            order.extend(group.into_iter().map(|(_, column)| column.to_owned()));
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    fn sample() -> Table {
        Table::with_rows(
            "main",
            vec![
                row(&[
                    ("Noun-base plural Russian", ""),
                    ("Comment", "header"),
                    ("Noun-base word English", ""),
                    ("Lesson title", "Food"),
                    ("Noun-base word Russian", ""),
                    ("Base image", ""),
                    ("Noun-base number English", ""),
                    ("Lesson number", "1.1"),
                    ("Lesson level number", "A1"),
                ]),
                row(&[
                    ("Noun-base plural Russian", "ЯБЛОКИ"),
                    ("Comment", ""),
                    ("Noun-base word English", "An apple"),
                    ("Lesson title", ""),
                    ("Noun-base word Russian", "ЯБЛОКО"),
                    ("Base image", "1.1.1"),
                    ("Noun-base number English", "1"),
                    ("Lesson number", ""),
                    ("Lesson level number", ""),
                ]),
            ],
        )
    }

    #[test]
    fn canonical_column_order() {
        let grammar = ColumnGrammar::default();
        let reordered = Reorderer::new(&grammar, SchemaPolicy::Strict)
            .reorder(&sample())
            .unwrap();
        let expected = vec![
            "Lesson level number",
            "Lesson number",
            "Lesson title",
            "Base image",
            "Comment",
            "Noun-base word Russian",
            "Noun-base plural Russian",
            "Noun-base number English",
            "Noun-base word English",
        ];
        for row in &reordered.data {
            assert_eq!(row.columns().collect::<Vec<_>>(), expected);
        }
        assert_eq!(reordered.data[1].get("Noun-base plural Russian"), Some("ЯБЛОКИ"));
        assert_eq!(reordered.data[0].get("Lesson title"), Some("Food"));
    }

    #[test]
    fn reorder_is_idempotent() {
        let grammar = ColumnGrammar::default();
        let reorderer = Reorderer::new(&grammar, SchemaPolicy::Strict);
        let once = reorderer.reorder(&sample()).unwrap();
        let twice = reorderer.reorder(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn gendered_forms_sit_between_word_and_plural() {
        let grammar = ColumnGrammar::default();
        let table = Table::with_rows(
            "adjectives",
            vec![row(&[
                ("Adjective-base plural English", ""),
                ("Adjective-base neuter English", ""),
                ("Adjective-base word English", ""),
                ("Adjective-base feminine English", ""),
                ("Adjective-base masculine English", ""),
                ("Adjective-base number English", ""),
            ])],
        );
        let order = Reorderer::new(&grammar, SchemaPolicy::Strict)
            .column_order(&table)
            .unwrap();
        assert_eq!(
            order,
            vec![
                "Adjective-base number English",
                "Adjective-base word English",
                "Adjective-base masculine English",
                "Adjective-base feminine English",
                "Adjective-base neuter English",
                "Adjective-base plural English",
            ]
        );
    }

    fn heterogeneous() -> Table {
        Table::with_rows(
            "main",
            vec![
                row(&[("Lesson title", "Food"), ("Base image", "")]),
                row(&[("Base image", "1.1.1"), ("Noun-base word Turkish", "Elma")]),
            ],
        )
    }

    #[test]
    fn strict_policy_rejects_heterogeneous_rows() {
        let grammar = ColumnGrammar::default();
        let error = Reorderer::new(&grammar, SchemaPolicy::Strict)
            .reorder(&heterogeneous())
            .unwrap_err();
        assert_eq!(
            error,
            ReorderError::HeterogeneousSchema {
                row: 1,
                missing: vec!["Lesson title".to_owned()],
                extra: vec!["Noun-base word Turkish".to_owned()],
            }
        );
    }

    #[test]
    fn first_row_policy_drops_later_columns() {
        let grammar = ColumnGrammar::default();
        let reordered = Reorderer::new(&grammar, SchemaPolicy::FirstRow)
            .reorder(&heterogeneous())
            .unwrap();
        assert_eq!(reordered.data[1].columns().collect::<Vec<_>>(), vec!["Lesson title", "Base image"]);
        assert_eq!(reordered.data[1].get("Lesson title"), Some(""));
        assert_eq!(reordered.data[1].get("Noun-base word Turkish"), None);
    }

    #[test]
    fn union_policy_keeps_every_column() {
        let grammar = ColumnGrammar::default();
        let reordered = Reorderer::new(&grammar, SchemaPolicy::Union)
            .reorder(&heterogeneous())
            .unwrap();
        let expected = vec!["Lesson title", "Base image", "Noun-base word Turkish"];
        assert_eq!(reordered.data[0].columns().collect::<Vec<_>>(), expected);
        assert_eq!(reordered.data[0].get("Noun-base word Turkish"), Some(""));
        assert_eq!(reordered.data[1].get("Noun-base word Turkish"), Some("Elma"));
    }

    #[test]
    fn empty_table_is_unchanged() {
        let grammar = ColumnGrammar::default();
        let table = Table::new("adjectives");
        assert_eq!(
            Reorderer::new(&grammar, SchemaPolicy::Strict).reorder(&table).unwrap(),
            table
        );
    }
}
