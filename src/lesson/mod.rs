//! # Lessons Derived From Tables
//!
//! Lessons are not stored as such: every read walks the table, finds the block
//! opened by a lesson header and turns its word rows into [`Word`]s. A lesson
//! only materializes as an independent value through [`Lesson::from_block`].
use crate::lesson::id::LessonId;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::Range;

pub mod catalog;
pub mod extractor;
pub mod id;
pub mod segmenter;

/// A word taken from one word row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Base image key
    pub image_base: String,
    /// Rendered image URL, empty when the row has none
    pub image_png: String,
    /// Lower-cased language label to text; only languages filled in for this row
    pub translations: BTreeMap<String, String>,
}

/// Level, number and title of a lesson header row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderInfo {
    pub level: String,
    pub lesson_number: String,
    pub title: String,
}

/// One lesson block: the header row and the word rows collected after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonBlock {
    pub header: HeaderInfo,
    /// Row indices spanned by the block, header included
    pub rows: Range<usize>,
    /// Indices of the rows the words were taken from
    pub word_rows: Vec<usize>,
    pub words: Vec<Word>,
}

/// Presentation defaults applied to lessons assembled from a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonStyle<'a> {
    pub studied_language: &'a str,
    pub hint_language: &'a str,
    pub font_color: &'a str,
    pub bg_color: &'a str,
}

/// A lesson with its words, as served to learners.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub level: String,
    pub theme: String,
    pub studied_language: String,
    pub hint_language: String,
    pub font_color: String,
    pub bg_color: String,
    pub lesson_number: String,
    pub words: Vec<Word>,
}

impl Lesson {
    /// Assembles a lesson from a segmented block. The theme mirrors the title.
    pub fn from_block(id: &LessonId, block: LessonBlock, style: &LessonStyle) -> Self {
        Self {
            id: id.to_string(),
            title: block.header.title.clone(),
            level: block.header.level,
            theme: block.header.title,
            studied_language: style.studied_language.to_owned(),
            hint_language: style.hint_language.to_owned(),
            font_color: style.font_color.to_owned(),
            bg_color: style.bg_color.to_owned(),
            lesson_number: block.header.lesson_number,
            words: block.words,
        }
    }
}

/// A lesson listing entry, without words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub level: String,
    pub theme: String,
    pub studied_language: String,
    pub hint_language: String,
    pub lesson_number: String,
}
