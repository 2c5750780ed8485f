use crate::helpers::string::non_blank;
use crate::lesson::id::LessonId;
use crate::lesson::segmenter::Segmenter;
use crate::lesson::HeaderInfo;
use crate::lesson::LessonSummary;
use crate::options::Options;
use crate::table::classifier::RowClassifier;
use crate::table::column::ColumnRole;
use crate::table::column::PartOfSpeech;
use crate::table::column::WordForm;
use crate::table::row::Row;
use crate::table::Table;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;
use tracing::warn;

/// Optional restrictions on the lesson listing. Blank values mean "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonFilter {
    /// Exact level value
    pub level: Option<String>,
    /// Language label whose noun word column the header row must carry
    pub studied_language: Option<String>,
    /// Language label whose noun word column the header row must carry
    pub hint_language: Option<String>,
}

/// A language flag shown in the learner's language picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    pub language: String,
    pub image: String,
}

/// Flags to create and delete so the flag list matches the table's languages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSyncPlan {
    pub to_add: Vec<Flag>,
    pub to_remove: Vec<String>,
}

const FALLBACK_FLAG: &str = "🏴";

/// Emoji flag for a language label, in Russian or English.
pub fn default_flag(language: &str) -> &'static str {
    match language {
        "Русский" | "Russian" => "🇷🇺",
        "Английский" | "English" => "🇺🇸",
        "Турецкий" | "Turkish" => "🇹🇷",
        "Испанский" | "Spanish" => "🇪🇸",
        "Немецкий" | "German" => "🇩🇪",
        "Французский" | "French" => "🇫🇷",
        "Итальянский" | "Italian" => "🇮🇹",
        "Китайский" | "Chinese" => "🇨🇳",
        "Японский" | "Japanese" => "🇯🇵",
        _ => FALLBACK_FLAG,
    }
}

/// Read-only listings over a table: lesson summaries, languages and levels.
pub struct Catalog<'a> {
    options: &'a Options,
}

impl<'a> Catalog<'a> {
    pub fn new(options: &'a Options) -> Self {
        Self { options }
    }

    /// Lesson headers as listing entries, filtered by level and language coverage.
    pub fn summaries(&self, table: &Table, filter: &LessonFilter) -> Vec<LessonSummary> {
        let style = self.options.style(
            filter.studied_language.as_deref(),
            filter.hint_language.as_deref(),
        );
        let mut summaries = Vec::new();
        for (row, header) in Segmenter::new(&self.options.grammar).headers(table) {
            if !self.accepts(row, &header, filter) {
                continue;
            }
            let id = match LessonId::new(&header.lesson_number, &header.title) {
                Ok(id) => id,
                Err(error) => {
                    warn!(%error, title = %header.title, "Skipping lesson without a usable identifier");
                    continue;
                }
            };
            summaries.push(LessonSummary {
                id: id.to_string(),
                theme: header.title.clone(),
                title: header.title,
                level: header.level,
                studied_language: style.studied_language.to_owned(),
                hint_language: style.hint_language.to_owned(),
                lesson_number: header.lesson_number,
            });
        }
        debug!(table = %table.name, count = summaries.len(), "Listed table lessons");
        summaries
    }

    fn accepts(&self, row: &Row, header: &HeaderInfo, filter: &LessonFilter) -> bool {
        if let Some(level) = non_blank(filter.level.as_deref()) {
            if header.level != level {
                return false;
            }
        }
        [&filter.studied_language, &filter.hint_language]
            .into_iter()
            .filter_map(|language| non_blank(language.as_deref()))
            .all(|language| self.covers(row, language))
    }

    /// True if the row has a noun word column for `language`, filled in or not.
    fn covers(&self, row: &Row, language: &str) -> bool {
        let role = ColumnRole::Translation {
            part: PartOfSpeech::Noun,
            form: WordForm::Word,
        };
        self.options
            .grammar
            .column_name(role, Some(language))
            .map(|column| row.contains(&column))
            .unwrap_or(false)
    }

    /// Distinct language labels of translation columns across all rows, sorted.
    pub fn available_languages(&self, table: &Table) -> Vec<String> {
        let mut languages = BTreeSet::new();
        for column in table.all_columns() {
            let column = self.options.grammar.classify(column);
            if let (true, Some(language)) = (column.role.is_translation(), column.language) {
                languages.insert(language);
            }
        }
        languages.into_iter().collect()
    }

    /// Distinct non-blank level values, sorted.
    pub fn available_levels(&self, table: &Table) -> Vec<String> {
        let classifier = RowClassifier::new(&self.options.grammar);
        table
            .data
            .iter()
            .filter_map(|row| classifier.level(row))
            .map(str::to_owned)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Compares the table's languages with the languages that already have a flag.
    /// New flags come sorted by language; removals keep the order of `existing`.
    pub fn plan_flag_sync(&self, table: &Table, existing: &[String]) -> FlagSyncPlan {
        let languages = self.available_languages(table);
        let to_add = languages
            .iter()
            .filter(|language| !existing.contains(language))
            .map(|language| Flag {
                language: language.clone(),
                image: default_flag(language).to_owned(),
            })
            .collect();
        let to_remove = existing
            .iter()
            .filter(|language| !languages.contains(language))
            .cloned()
            .collect();
        FlagSyncPlan { to_add, to_remove }
    }
}
