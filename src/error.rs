use thiserror::Error;

/// Main error type of the lesson table compiler.
/// Aggregates the errors of every module plus the few third-party errors that
/// surface directly.
#[derive(Error, Debug)]
pub enum LessonTableError {
    #[error("{0}")]
    WithContextError(String),

    #[error("{0}")]
    AnyhowError(#[from] anyhow::Error),

    // Third-party library errors
    #[error("{0}")]
    JsonError(#[from] serde_json::Error),

    // Table module errors
    #[error("{0}")]
    TableError(#[from] crate::table::TableError),

    // Lesson module errors
    #[error("{0}")]
    IdentifierError(#[from] crate::lesson::id::IdentifierError),

    #[error("{0}")]
    SegmentError(#[from] crate::lesson::segmenter::SegmentError),

    // Transform module errors
    #[error("{0}")]
    ReorderError(#[from] crate::transform::reorder::ReorderError),

    // Database module errors
    #[error("{0}")]
    StoreError(#[from] crate::database::StoreError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, LessonTableError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| LessonTableError::WithContextError(format!("{}: {}", message, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::id::IdentifierError;

    #[test]
    fn prefix_keeps_message() {
        let result: Result<(), LessonTableError> =
            Err(IdentifierError::Malformed("lesson-1".to_owned()).into());
        let error = result.with_prefix("Failed to open lesson").unwrap_err();
        assert!(matches!(error, LessonTableError::WithContextError(_)));
        assert!(error.to_string().starts_with("Failed to open lesson: "));
        assert!(error.to_string().contains("lesson-1"));
    }
}
