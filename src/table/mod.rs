//! # Lesson Table Model
//!
//! A lesson table is a named, ordered list of loosely-schemaed rows. Column names
//! carry meaning (a semantic field plus, for language-scoped fields, a trailing
//! language label); [`column::ColumnGrammar`] decodes them and
//! [`classifier::RowClassifier`] decides what each row is.
use crate::table::column::ColumnGrammar;
use crate::table::column::ColumnRole;
use crate::table::column::PartOfSpeech;
use crate::table::column::WordForm;
use crate::table::row::Row;
use indexmap::IndexSet;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

pub mod classifier;
pub mod column;
pub mod row;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Unknown table kind '{0}'")]
    UnknownKind(String),
}

fn default_name() -> String {
    TableKind::Main.as_str().to_owned()
}

/// A table document as persisted: `{ "name": ..., "data": [row, ...] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Logical table name ("main", "adjectives", ...)
    #[serde(default = "default_name")]
    pub name: String,
    /// Rows in display order
    #[serde(default)]
    pub data: Vec<Row>,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            data: Vec::new(),
        }
    }

    /// Creates a table holding `rows`.
    pub fn with_rows(name: &str, rows: Vec<Row>) -> Self {
        Self {
            name: name.to_owned(),
            data: rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Column names of the first row, in order.
    pub fn first_row_columns(&self) -> Vec<&str> {
        self.data
            .first()
            .map(|row| row.columns().collect())
            .unwrap_or_default()
    }

    /// Union of column names across all rows, in first-seen order.
    pub fn all_columns(&self) -> IndexSet<&str> {
        self.data.iter().flat_map(|row| row.columns()).collect()
    }
}

/// The parallel tables the lesson content is split into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableKind {
    /// Nouns, stored under the name "main"
    Main,
    Adjectives,
    Prepositions,
    QuestionWords,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        Self::Main,
        Self::Adjectives,
        Self::Prepositions,
        Self::QuestionWords,
    ];

    /// Returns the name the table is stored under.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Adjectives => "adjectives",
            Self::Prepositions => "prepositions",
            Self::QuestionWords => "question-words",
        }
    }

    /// Parses a stored table name. Accepts "nouns" as an alias of "main".
    pub fn parse(name: &str) -> Result<Self, TableError> {
        match name {
            "main" | "nouns" => Ok(Self::Main),
            "adjectives" => Ok(Self::Adjectives),
            "prepositions" => Ok(Self::Prepositions),
            "question-words" => Ok(Self::QuestionWords),
            _ => Err(TableError::UnknownKind(name.to_owned())),
        }
    }

    /// Language-scoped roles a table of this kind carries, in canonical order.
    pub fn language_roles(&self) -> Vec<ColumnRole> {
        const NOUN_FORMS: &[WordForm] = &[WordForm::Number, WordForm::Word, WordForm::Plural];
        const ADJECTIVE_FORMS: &[WordForm] = &[
            WordForm::Number,
            WordForm::Word,
            WordForm::Masculine,
            WordForm::Feminine,
            WordForm::Neuter,
            WordForm::Plural,
        ];
        const WORD_ONLY: &[WordForm] = &[WordForm::Word];
        let (part, forms) = match self {
            Self::Main => (PartOfSpeech::Noun, NOUN_FORMS),
            Self::Adjectives => (PartOfSpeech::Adjective, ADJECTIVE_FORMS),
            Self::Prepositions => (PartOfSpeech::Preposition, WORD_ONLY),
            Self::QuestionWords => (PartOfSpeech::QuestionWord, WORD_ONLY),
        };
        forms
            .iter()
            .map(|form| ColumnRole::Translation { part, form: *form })
            .collect()
    }

    /// Columns an empty table of this kind is seeded with: the fixed fields,
    /// then every language-scoped role for each language in turn. Roles the
    /// grammar has no prefix for are skipped.
    pub fn canonical_schema(&self, grammar: &ColumnGrammar, languages: &[String]) -> Vec<String> {
        let mut columns: IndexSet<String> = ColumnRole::BASE
            .into_iter()
            .filter_map(|role| grammar.column_name(role, None))
            .collect();
        let roles = self.language_roles();
        for language in languages {
            columns.extend(
                roles
                    .iter()
                    .filter_map(|role| grammar.column_name(*role, Some(language.as_str()))),
            );
        }
        columns.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_json_shape() {
        let table: Table = serde_json::from_str(r#"{"data":[{"a":"1"},{"b":"2","a":"3"}]}"#).unwrap();
        assert_eq!(table.name, "main");
        assert_eq!(table.len(), 2);
        assert_eq!(table.first_row_columns(), vec!["a"]);
        assert_eq!(table.all_columns().into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn kind_names() {
        for kind in TableKind::ALL {
            assert_eq!(TableKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert_eq!(TableKind::parse("nouns").unwrap(), TableKind::Main);
        assert!(TableKind::parse("verbs").is_err());
    }

    #[test]
    fn canonical_schema_for_nouns() {
        let grammar = ColumnGrammar::default();
        let languages = vec!["Russian".to_owned(), "English".to_owned()];
        assert_eq!(
            TableKind::Main.canonical_schema(&grammar, &languages),
            vec![
                "Lesson level number",
                "Lesson number",
                "Lesson title",
                "Base image",
                "Rendered image",
                "Noun-base number Russian",
                "Noun-base word Russian",
                "Noun-base plural Russian",
                "Noun-base number English",
                "Noun-base word English",
                "Noun-base plural English",
            ]
        );
    }

    #[test]
    fn canonical_schema_skips_missing_prefixes() {
        let grammar = ColumnGrammar::russian();
        let languages = vec!["Русский".to_owned()];
        assert_eq!(
            TableKind::Adjectives.canonical_schema(&grammar, &languages),
            vec![
                "Уровень изучения номер",
                "Урок номер",
                "Урок название",
                "База изображение",
                "Картинка png",
            ]
        );
        assert_eq!(
            TableKind::Main.canonical_schema(&grammar, &languages).last().map(String::as_str),
            Some("База существительные слова Русский")
        );
    }
}
