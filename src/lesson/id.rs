use regex::Regex;
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

const PREFIX: &str = "table_";

/// Errors related to synthetic lesson identifiers. These are client errors,
/// distinct from a lesson that cannot be found.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid lesson ID format '{0}'")]
    Malformed(String),

    #[error("Invalid lesson number '{0}': must be non-blank and contain no '_'")]
    InvalidLessonNumber(String),
}

/// Identifier of a lesson that only exists inside a table:
/// `table_<lesson number>_<url-encoded title>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LessonId {
    lesson_number: String,
    title: String,
}

impl LessonId {
    /// Builds an identifier. The lesson number is written unencoded, so it may
    /// not contain the '_' separator.
    pub fn new(lesson_number: &str, title: &str) -> Result<Self, IdentifierError> {
        if lesson_number.trim().is_empty() || lesson_number.contains('_') {
            Err(IdentifierError::InvalidLessonNumber(lesson_number.to_owned()))?;
        }
        Ok(Self {
            lesson_number: lesson_number.to_owned(),
            title: title.to_owned(),
        })
    }

    /// Parses `table_<number>_<title>`, url-decoding the title segment.
    pub fn parse(value: &str) -> Result<Self, IdentifierError> {
        let pattern = Regex::new(r"^table_([^_]+)_(.+)$").expect("Hardcode regex pattern");
        let captures = pattern
            .captures(value)
            .ok_or_else(|| IdentifierError::Malformed(value.to_owned()))?;
        let lesson_number = &captures[1];
        let title = urlencoding::decode(&captures[2])
            .map_err(|_| IdentifierError::Malformed(value.to_owned()))?;
        Self::new(lesson_number, &title).map_err(|_| IdentifierError::Malformed(value.to_owned()))
    }

    pub fn lesson_number(&self) -> &str {
        &self.lesson_number
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Writes `table_<number>_<title>` with the title percent-encoded. Only ASCII
/// letters, digits and `-_.~` stay literal; `!'()*` are encoded too, which
/// JavaScript's `encodeURIComponent` leaves alone. Ids from such clients still
/// parse, but "Food (fruit)" is written as `Food%20%28fruit%29`.
impl Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}_{}",
            PREFIX,
            self.lesson_number,
            urlencoding::encode(&self.title)
        )
    }
}

impl FromStr for LessonId {
    type Err = IdentifierError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_identifier() {
        let id = LessonId::new("1.1", "Food & drinks").unwrap();
        assert_eq!(id.to_string(), "table_1.1_Food%20%26%20drinks");
    }

    #[test]
    fn reserved_marks_are_encoded_but_accepted_literally() {
        let id = LessonId::new("3.1", "Food (fruit)!").unwrap();
        assert_eq!(id.to_string(), "table_3.1_Food%20%28fruit%29%21");
        let parsed = LessonId::parse("table_3.1_Food%20(fruit)!").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn round_trip_non_ascii_and_punctuation() {
        for title in ["Еда", "Фрукты/овощи: 100%", "a_b c?d#e", "Türkçe ğüşöç"] {
            let id = LessonId::new("2.3", title).unwrap();
            let parsed = LessonId::parse(&id.to_string()).unwrap();
            assert_eq!(parsed, id);
            assert_eq!(parsed.title(), title);
            assert_eq!(parsed.lesson_number(), "2.3");
        }
    }

    #[test]
    fn parse_unencoded_title() {
        let id: LessonId = "table_1.1_Food".parse().unwrap();
        assert_eq!(id.lesson_number(), "1.1");
        assert_eq!(id.title(), "Food");
    }

    #[test]
    fn malformed_identifiers() {
        for value in ["", "table_", "table_1.1", "table__Food", "lesson_1.1_Food", "table_1.1_%E0%A4%A"] {
            assert_eq!(
                LessonId::parse(value),
                Err(IdentifierError::Malformed(value.to_owned())),
                "{value}"
            );
        }
    }

    #[test]
    fn lesson_number_with_separator_is_rejected() {
        assert_eq!(
            LessonId::new("1_1", "Food"),
            Err(IdentifierError::InvalidLessonNumber("1_1".to_owned()))
        );
        assert!(LessonId::new(" ", "Food").is_err());
    }
}
