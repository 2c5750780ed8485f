//! # Lesson Service
//!
//! The operations exposed to callers, each one a load / transform / (optionally)
//! store cycle over a [`TableStore`]. A table that was never stored reads as an
//! empty table, so listings come back empty instead of failing.
use crate::database::TableStore;
use crate::error::LessonTableError;
use crate::error::ResultMessage;
use crate::lesson::catalog::Catalog;
use crate::lesson::catalog::FlagSyncPlan;
use crate::lesson::catalog::LessonFilter;
use crate::lesson::id::LessonId;
use crate::lesson::segmenter::Segmenter;
use crate::lesson::Lesson;
use crate::lesson::LessonSummary;
use crate::options::Options;
use crate::table::Table;
use crate::table::TableKind;
use crate::transform::reorder::Reorderer;
use crate::transform::themes::ThemeSync;
use crate::transform::themes::ThemeSynchronizer;
use tracing::info;
use tracing::warn;

pub struct LessonService<S> {
    store: S,
    options: Options,
}

impl<S: TableStore> LessonService<S> {
    pub fn new(store: S, options: Options) -> Self {
        Self { store, options }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Lesson headers of a table as listing entries.
    pub fn lessons_summary(
        &self,
        table_name: &str,
        filter: &LessonFilter,
    ) -> Result<Vec<LessonSummary>, LessonTableError> {
        let table = self.load(table_name)?;
        Ok(Catalog::new(&self.options).summaries(&table, filter))
    }

    /// Assembles the lesson a synthetic identifier points at.
    ///
    /// A malformed identifier is reported before the store is touched.
    pub fn lesson_detail(
        &self,
        table_name: &str,
        id: &str,
        studied_language: Option<&str>,
        hint_language: Option<&str>,
    ) -> Result<Lesson, LessonTableError> {
        let id = LessonId::parse(id)?;
        let table = self.load(table_name)?;
        let block = Segmenter::new(&self.options.grammar).segment(&table, id.lesson_number(), id.title())?;
        let style = self.options.style(studied_language, hint_language);
        Ok(Lesson::from_block(&id, block, &style))
    }

    /// Builds an independent lesson value from the block opened by the header
    /// with the given number and title. The result no longer follows the table.
    pub fn materialize_lesson(
        &self,
        table_name: &str,
        lesson_number: &str,
        title: &str,
        studied_language: Option<&str>,
        hint_language: Option<&str>,
    ) -> Result<Lesson, LessonTableError> {
        let id = LessonId::new(lesson_number, title)?;
        let table = self.load(table_name)?;
        let block = Segmenter::new(&self.options.grammar).segment(&table, lesson_number, title)?;
        let style = self.options.style(studied_language, hint_language);
        info!(table = table_name, lesson = %id, words = block.words.len(), "Materialized lesson");
        Ok(Lesson::from_block(&id, block, &style))
    }

    /// Materializes every lesson block of a table in row order. Blocks whose
    /// header cannot form an identifier are skipped.
    pub fn materialize_all(
        &self,
        table_name: &str,
        studied_language: Option<&str>,
        hint_language: Option<&str>,
    ) -> Result<Vec<Lesson>, LessonTableError> {
        let table = self.load(table_name)?;
        let style = self.options.style(studied_language, hint_language);
        let mut lessons = Vec::new();
        for block in Segmenter::new(&self.options.grammar).blocks(&table) {
            match LessonId::new(&block.header.lesson_number, &block.header.title) {
                Ok(id) => lessons.push(Lesson::from_block(&id, block, &style)),
                Err(error) => warn!(%error, table = table_name, "Skipping lesson block"),
            }
        }
        Ok(lessons)
    }

    /// Rewrites a table in canonical column order and stores it.
    pub fn reorder_columns(&self, table_name: &str) -> Result<Table, LessonTableError> {
        let table = self.load(table_name)?;
        let reordered = Reorderer::new(&self.options.grammar, self.options.schema_policy).reorder(&table)?;
        self.save(&reordered)?;
        info!(table = table_name, rows = reordered.len(), "Stored reordered table");
        Ok(reordered)
    }

    /// Copies the lesson themes of `source_name` into the table named `target_name`
    /// and stores the target. The source is left untouched.
    ///
    /// The target must name one of the [`TableKind`] tables, since an empty
    /// target is seeded with the columns of its kind.
    pub fn sync_themes(
        &self,
        source_name: &str,
        target_name: &str,
    ) -> Result<ThemeSync, LessonTableError> {
        let target_kind = TableKind::parse(target_name)?;
        let source = self.load(source_name)?;
        let target = self.load(target_kind.as_str())?;
        let sync = ThemeSynchronizer::new(&self.options).sync(&source, &target, target_kind);
        if !sync.added_themes.is_empty() {
            self.save(&sync.table)?;
        }
        Ok(sync)
    }

    pub fn available_languages(&self, table_name: &str) -> Result<Vec<String>, LessonTableError> {
        let table = self.load(table_name)?;
        Ok(Catalog::new(&self.options).available_languages(&table))
    }

    pub fn available_levels(&self, table_name: &str) -> Result<Vec<String>, LessonTableError> {
        let table = self.load(table_name)?;
        Ok(Catalog::new(&self.options).available_levels(&table))
    }

    /// Flags to add and remove so that `existing` matches the table's languages.
    pub fn plan_flag_sync(
        &self,
        table_name: &str,
        existing: &[String],
    ) -> Result<FlagSyncPlan, LessonTableError> {
        let table = self.load(table_name)?;
        Ok(Catalog::new(&self.options).plan_flag_sync(&table, existing))
    }

    /// The stored table, or an empty one under the same name.
    fn load(&self, table_name: &str) -> Result<Table, LessonTableError> {
        let table = self
            .store
            .get(table_name)
            .map_err(LessonTableError::from)
            .with_prefix(&format!("Failed to load table '{}'", table_name))?;
        Ok(table.unwrap_or_else(|| Table::new(table_name)))
    }

    fn save(&self, table: &Table) -> Result<(), LessonTableError> {
        self.store
            .replace(table)
            .map_err(LessonTableError::from)
            .with_prefix(&format!("Failed to store table '{}'", table.name))?;
        Ok(())
    }
}
