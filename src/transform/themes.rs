use crate::helpers::string::non_blank;
use crate::options::Options;
use crate::table::classifier::RowClassifier;
use crate::table::classifier::RowKind;
use crate::table::row::Row;
use crate::table::Table;
use crate::table::TableKind;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::info;

/// Result of a theme synchronization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSync {
    /// The target table with the new theme rows appended
    #[serde(rename = "updatedTable")]
    pub table: Table,
    /// Themes appended to the target, in source order
    pub added_themes: Vec<String>,
    /// Themes only the target has; reported, never removed
    pub target_only_themes: Vec<String>,
}

/// Copies lesson themes (distinct lesson titles) from one table into a parallel one.
///
/// Only header placeholders are created: level and lesson number come from the
/// first source header with that title, every other column is left empty. Rows
/// already in the target are never touched.
pub struct ThemeSynchronizer<'a> {
    options: &'a Options,
}

impl<'a> ThemeSynchronizer<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Appends a header row to `target` for every source theme it lacks.
    /// An empty target is first given the canonical columns of `kind`.
    ///
    /// New rows carry every column of the target plus the level, number and
    /// title columns. Existing rows are not widened, so a target lacking any of
    /// those three columns comes back with rows of different widths, which a
    /// [`SchemaPolicy::Strict`](crate::transform::reorder::SchemaPolicy::Strict)
    /// reorder rejects.
    pub fn sync(&self, source: &Table, target: &Table, kind: TableKind) -> ThemeSync {
        let grammar = &self.options.grammar;
        let classifier = RowClassifier::new(grammar);

        // theme -> first source header carrying it
        let mut representatives: IndexMap<&str, &Row> = IndexMap::new();
        for row in &source.data {
            if classifier.classify(row) != RowKind::LessonHeader {
                continue;
            }
            if let Some(title) = classifier.title(row) {
                representatives.entry(title).or_insert(row);
            }
        }

        let target_themes: IndexSet<&str> = target
            .data
            .iter()
            .filter_map(|row| classifier.title(row))
            .collect();

        let mut columns: IndexSet<String> = if target.is_empty() {
            kind.canonical_schema(grammar, &self.options.languages)
                .into_iter()
                .collect()
        } else {
            target.all_columns().into_iter().map(str::to_owned).collect()
        };
        for fixed in [&grammar.level, &grammar.lesson_number, &grammar.lesson_title] {
            columns.insert(fixed.clone());
        }

        let mut table = target.clone();
        let mut added_themes = Vec::new();
        for (&theme, &header) in &representatives {
            if target_themes.contains(theme) {
                continue;
            }
            let mut row: Row = columns.iter().map(|column| (column.as_str(), "")).collect();
            row.set(grammar.level.as_str(), non_blank(header.get(&grammar.level)).unwrap_or_default());
            row.set(
                grammar.lesson_number.as_str(),
                non_blank(header.get(&grammar.lesson_number)).unwrap_or_default(),
            );
            row.set(grammar.lesson_title.as_str(), theme);
            table.data.push(row);
            added_themes.push(theme.to_string());
        }

        let target_only_themes = target_themes
            .into_iter()
            .filter(|theme| !representatives.contains_key(theme))
            .map(str::to_owned)
            .collect();

        info!(
            source = %source.name,
            target = %target.name,
            added = added_themes.len(),
            "Synchronized lesson themes"
        );
        ThemeSync {
            table,
            added_themes,
            target_only_themes,
        }
    }
}
