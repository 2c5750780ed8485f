use crate::helpers::string::is_blank;
use crate::helpers::string::non_blank;
use crate::table::column::ColumnGrammar;
use crate::table::row::Row;

/// What a row means for lesson segmentation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Level, lesson number and title are all filled in
    LessonHeader,
    /// Carries a base image and is not a header
    WordRow,
    /// Neither; inert for segmentation but kept by rewrites
    Other,
}

/// Classifies rows using the fixed columns of a [`ColumnGrammar`].
#[derive(Copy, Clone, Debug)]
pub struct RowClassifier<'a> {
    grammar: &'a ColumnGrammar,
}

impl<'a> RowClassifier<'a> {
    pub fn new(grammar: &'a ColumnGrammar) -> Self {
        Self { grammar }
    }

    pub fn grammar(&self) -> &'a ColumnGrammar {
        self.grammar
    }

    /// Header detection takes priority: a header row is never also a word row,
    /// even when its base image cell is filled in.
    pub fn classify(&self, row: &Row) -> RowKind {
        if self.is_header(row) {
            RowKind::LessonHeader
        } else if !is_blank(row.get(&self.grammar.base_image)) {
            RowKind::WordRow
        } else {
            RowKind::Other
        }
    }

    fn is_header(&self, row: &Row) -> bool {
        [
            &self.grammar.level,
            &self.grammar.lesson_number,
            &self.grammar.lesson_title,
        ]
        .into_iter()
        .all(|column| !is_blank(row.get(column)))
    }

    /// Non-blank level cell.
    pub fn level<'r>(&self, row: &'r Row) -> Option<&'r str> {
        non_blank(row.get(&self.grammar.level))
    }

    /// Non-blank lesson number cell.
    pub fn lesson_number<'r>(&self, row: &'r Row) -> Option<&'r str> {
        non_blank(row.get(&self.grammar.lesson_number))
    }

    /// Non-blank lesson title cell.
    pub fn title<'r>(&self, row: &'r Row) -> Option<&'r str> {
        non_blank(row.get(&self.grammar.lesson_title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(level: &str, number: &str, title: &str) -> Row {
        Row::new()
            .with("Lesson level number", level)
            .with("Lesson number", number)
            .with("Lesson title", title)
            .with("Base image", "")
    }

    #[test]
    fn classify_rows() {
        let grammar = ColumnGrammar::default();
        let classifier = RowClassifier::new(&grammar);

        assert_eq!(classifier.classify(&header("A1", "1.1", "Food")), RowKind::LessonHeader);
        assert_eq!(
            classifier.classify(&header("", "", "").with("Base image", "1.1.1")),
            RowKind::WordRow
        );
        assert_eq!(classifier.classify(&header("", "", "")), RowKind::Other);
        assert_eq!(classifier.classify(&Row::new()), RowKind::Other);
    }

    #[test]
    fn header_wins_over_word_row() {
        let grammar = ColumnGrammar::default();
        let classifier = RowClassifier::new(&grammar);
        let row = header("A1", "1.1", "Food").with("Base image", "1.1.1");
        assert_eq!(classifier.classify(&row), RowKind::LessonHeader);
    }

    #[test]
    fn whitespace_is_blank() {
        let grammar = ColumnGrammar::default();
        let classifier = RowClassifier::new(&grammar);
        assert_eq!(classifier.classify(&header("A1", "1.1", "  ")), RowKind::Other);
        assert_eq!(
            classifier.classify(&header("A1", " ", "Food").with("Base image", "x")),
            RowKind::WordRow
        );
        assert_eq!(classifier.lesson_number(&header("A1", " ", "Food")), None);
        assert_eq!(classifier.title(&header("A1", "1.1", "Food")), Some("Food"));
    }
}
