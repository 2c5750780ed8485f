use crate::lesson::extractor::extract;
use crate::lesson::HeaderInfo;
use crate::lesson::LessonBlock;
use crate::table::classifier::RowClassifier;
use crate::table::classifier::RowKind;
use crate::table::column::ColumnGrammar;
use crate::table::row::Row;
use crate::table::Table;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Lesson not found in table: number '{lesson_number}', title '{title}'")]
    LessonNotFound { lesson_number: String, title: String },
}

/// Scanner state while walking the rows of a table.
enum SegmenterState {
    /// Looking for the header that opens the requested block
    SeekingHeader,
    /// Inside a block, appending word rows until a header with another number
    CollectingWords(LessonBlock),
}

/// Partitions the flat row stream of a table into lesson blocks.
#[derive(Copy, Clone, Debug)]
pub struct Segmenter<'a> {
    classifier: RowClassifier<'a>,
}

impl<'a> Segmenter<'a> {
    pub fn new(grammar: &'a ColumnGrammar) -> Self {
        Self {
            classifier: RowClassifier::new(grammar),
        }
    }

    /// Collects the block opened by the header with the given lesson number and title.
    ///
    /// Collection stops at the next header carrying a different lesson number or at
    /// the end of the table. Headers repeating the same number and rows that are
    /// neither headers nor word rows are skipped without ending the block.
    pub fn segment(
        &self,
        table: &Table,
        lesson_number: &str,
        title: &str,
    ) -> Result<LessonBlock, SegmentError> {
        let mut state = SegmenterState::SeekingHeader;
        for (index, row) in table.data.iter().enumerate() {
            let kind = self.classifier.classify(row);
            state = match state {
                SegmenterState::SeekingHeader => {
                    let is_requested = kind == RowKind::LessonHeader
                        && self.classifier.lesson_number(row) == Some(lesson_number)
                        && self.classifier.title(row) == Some(title);
                    if is_requested {
                        debug!(row = index, lesson_number, title, "Found lesson header");
                        SegmenterState::CollectingWords(self.open_block(index, row))
                    } else {
                        SegmenterState::SeekingHeader
                    }
                }
                SegmenterState::CollectingWords(mut block) => {
                    if self.ends_block(&block, kind, row) {
                        return Ok(block.close(index));
                    }
                    self.collect(&mut block, index, kind, row);
                    SegmenterState::CollectingWords(block)
                }
            };
        }
        match state {
            SegmenterState::CollectingWords(block) => Ok(block.close(table.len())),
            SegmenterState::SeekingHeader => Err(SegmentError::LessonNotFound {
                lesson_number: lesson_number.to_owned(),
                title: title.to_owned(),
            }),
        }
    }

    /// Every block of the table in row order. Rows before the first header belong
    /// to no block.
    pub fn blocks(&self, table: &Table) -> Vec<LessonBlock> {
        let mut blocks = Vec::new();
        let mut state = SegmenterState::SeekingHeader;
        for (index, row) in table.data.iter().enumerate() {
            let kind = self.classifier.classify(row);
            state = match state {
                SegmenterState::SeekingHeader if kind == RowKind::LessonHeader => {
                    SegmenterState::CollectingWords(self.open_block(index, row))
                }
                SegmenterState::SeekingHeader => SegmenterState::SeekingHeader,
                SegmenterState::CollectingWords(block) if self.ends_block(&block, kind, row) => {
                    blocks.push(block.close(index));
                    SegmenterState::CollectingWords(self.open_block(index, row))
                }
                SegmenterState::CollectingWords(mut block) => {
                    self.collect(&mut block, index, kind, row);
                    SegmenterState::CollectingWords(block)
                }
            };
        }
        if let SegmenterState::CollectingWords(block) = state {
            blocks.push(block.close(table.len()));
        }
        blocks
    }

    /// All header rows annotated with level, number and title; no word extraction.
    pub fn summarize(&self, table: &Table) -> Vec<HeaderInfo> {
        self.headers(table).map(|(_, header)| header).collect()
    }

    /// Header rows paired with their level, number and title, in table order.
    pub fn headers<'t>(&self, table: &'t Table) -> impl Iterator<Item = (&'t Row, HeaderInfo)> + 't
    where
        'a: 't,
    {
        let segmenter = *self;
        table
            .data
            .iter()
            .filter(move |row| segmenter.classifier.classify(row) == RowKind::LessonHeader)
            .map(move |row| (row, segmenter.header_info(row)))
    }

    fn header_info(&self, row: &Row) -> HeaderInfo {
        HeaderInfo {
            level: self.classifier.level(row).unwrap_or_default().to_owned(),
            lesson_number: self.classifier.lesson_number(row).unwrap_or_default().to_owned(),
            title: self.classifier.title(row).unwrap_or_default().to_owned(),
        }
    }

    fn open_block(&self, index: usize, row: &Row) -> LessonBlock {
        LessonBlock {
            header: self.header_info(row),
            rows: index..index + 1,
            word_rows: Vec::new(),
            words: Vec::new(),
        }
    }

    fn ends_block(&self, block: &LessonBlock, kind: RowKind, row: &Row) -> bool {
        kind == RowKind::LessonHeader
            && self.classifier.lesson_number(row) != Some(block.header.lesson_number.as_str())
    }

    fn collect(&self, block: &mut LessonBlock, index: usize, kind: RowKind, row: &Row) {
        if kind == RowKind::WordRow {
            block.word_rows.push(index);
            block.words.push(extract(self.classifier.grammar(), row));
        }
    }
}

impl LessonBlock {
    fn close(mut self, end: usize) -> Self {
        self.rows.end = end;
        self
    }
}
