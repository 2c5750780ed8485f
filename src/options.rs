//! Compiler configuration.
//!
//! Every field has a default, so a configuration file only lists what it changes:
//!
//! ```json
//! { "schema_policy": "union", "languages": ["Russian", "English"] }
//! ```
use crate::lesson::LessonStyle;
use crate::table::column::ColumnGrammar;
use crate::transform::reorder::SchemaPolicy;
use anyhow::Context;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Settings shared by every table operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Column names of the fixed and language-scoped fields
    pub grammar: ColumnGrammar,
    /// Which rows define the column set when reordering
    pub schema_policy: SchemaPolicy,
    /// Language labels an empty table is seeded with, in column order
    pub languages: Vec<String>,
    /// Studied language reported when the caller names none
    pub default_studied_language: String,
    /// Hint language reported when the caller names none
    pub default_hint_language: String,
    /// Font colour of lessons assembled from a table
    pub font_color: String,
    /// Background colour of lessons assembled from a table
    pub bg_color: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            grammar: ColumnGrammar::default(),
            schema_policy: SchemaPolicy::default(),
            languages: vec!["Russian".to_owned(), "English".to_owned(), "Turkish".to_owned()],
            default_studied_language: "русский".to_owned(),
            default_hint_language: "английский".to_owned(),
            font_color: "#000000".to_owned(),
            bg_color: "#ffffff".to_owned(),
        }
    }
}

impl Options {
    /// Parses options from a JSON document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file '{}'", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("Failed to parse options file '{}'", path.display()))
    }

    /// Lesson presentation, falling back to the configured languages when the
    /// caller leaves them out or blank.
    pub fn style<'a>(
        &'a self,
        studied_language: Option<&'a str>,
        hint_language: Option<&'a str>,
    ) -> LessonStyle<'a> {
        let pick = |value: Option<&'a str>, default: &'a str| {
            value.filter(|value| !value.trim().is_empty()).unwrap_or(default)
        };
        LessonStyle {
            studied_language: pick(studied_language, self.default_studied_language.as_str()),
            hint_language: pick(hint_language, self.default_hint_language.as_str()),
            font_color: &self.font_color,
            bg_color: &self.bg_color,
        }
    }
}
