use crate::helpers::string::last_token;
use serde::Deserialize;
use serde::Serialize;

/// Part of speech a per-language column belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartOfSpeech {
    Noun,
    Adjective,
    Preposition,
    QuestionWord,
}

/// Grammatical form held by a per-language column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordForm {
    /// Grammatical number marker of the word
    Number,
    /// Base (dictionary) form, the one lessons translate
    Word,
    Masculine,
    Feminine,
    Neuter,
    Plural,
}

impl WordForm {
    /// Position of the form inside a language group.
    /// Number first, then the base word and gendered forms, plural last.
    pub const fn rank(&self) -> usize {
        match self {
            Self::Number => 0,
            Self::Word => 1,
            Self::Masculine => 2,
            Self::Feminine => 3,
            Self::Neuter => 4,
            Self::Plural => 5,
        }
    }
}

/// Semantic role of a column, as decided by [`ColumnGrammar`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// Study level of the lesson (e.g. "A1")
    Level,
    /// Lesson number (e.g. "1.1")
    LessonNumber,
    /// Lesson title, also used as the theme key
    LessonTitle,
    /// Key of the base image of a word
    BaseImage,
    /// URL of the rendered image of a word
    RenderedImage,
    /// A language-scoped field
    Translation { part: PartOfSpeech, form: WordForm },
    /// Anything the grammar does not recognize; preserved verbatim
    Unknown,
}

impl ColumnRole {
    /// Canonical order of the fixed, language-less fields.
    pub const BASE: [ColumnRole; 5] = [
        Self::Level,
        Self::LessonNumber,
        Self::LessonTitle,
        Self::BaseImage,
        Self::RenderedImage,
    ];

    /// Returns the canonical position of a fixed field, None for other roles.
    pub fn base_rank(&self) -> Option<usize> {
        Self::BASE.iter().position(|role| role == self)
    }

    /// Returns true for columns whose non-blank cells become word translations.
    pub fn is_translation(&self) -> bool {
        matches!(self, Self::Translation { form: WordForm::Word, .. })
    }
}

/// A column name resolved into its role and optional language label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Column name exactly as it appears in the table
    pub name: String,
    /// Semantic role
    pub role: ColumnRole,
    /// Language label (last token of the name) for language-scoped columns
    pub language: Option<String>,
}

/// A per-language column prefix and the role it denotes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageField {
    pub prefix: String,
    pub part: PartOfSpeech,
    pub form: WordForm,
}

impl LanguageField {
    fn new(prefix: &str, part: PartOfSpeech, form: WordForm) -> Self {
        Self {
            prefix: prefix.to_owned(),
            part,
            form,
        }
    }
}

/// Maps column names to semantic roles.
///
/// Fixed fields match by exact name. Language-scoped fields match when the name
/// contains one of the configured prefixes; the language is then the last
/// whitespace-delimited token. Matching is case- and punctuation-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnGrammar {
    pub level: String,
    pub lesson_number: String,
    pub lesson_title: String,
    pub base_image: String,
    pub rendered_image: String,
    /// Checked in order; the first prefix contained in a name wins
    pub language_fields: Vec<LanguageField>,
}

impl Default for ColumnGrammar {
    fn default() -> Self {
        use PartOfSpeech::*;
        use WordForm::*;
        Self {
            level: "Lesson level number".to_owned(),
            lesson_number: "Lesson number".to_owned(),
            lesson_title: "Lesson title".to_owned(),
            base_image: "Base image".to_owned(),
            rendered_image: "Rendered image".to_owned(),
            language_fields: vec![
                LanguageField::new("Noun-base number", Noun, Number),
                LanguageField::new("Noun-base word", Noun, Word),
                LanguageField::new("Noun-base plural", Noun, Plural),
                LanguageField::new("Adjective-base number", Adjective, Number),
                LanguageField::new("Adjective-base word", Adjective, Word),
                LanguageField::new("Adjective-base masculine", Adjective, Masculine),
                LanguageField::new("Adjective-base feminine", Adjective, Feminine),
                LanguageField::new("Adjective-base neuter", Adjective, Neuter),
                LanguageField::new("Adjective-base plural", Adjective, Plural),
                LanguageField::new("Preposition-base word", Preposition, Word),
                LanguageField::new("Question-base word", QuestionWord, Word),
            ],
        }
    }
}

impl ColumnGrammar {
    /// Headers used by the Russian-language admin sheet.
    pub fn russian() -> Self {
        Self {
            level: "Уровень изучения номер".to_owned(),
            lesson_number: "Урок номер".to_owned(),
            lesson_title: "Урок название".to_owned(),
            base_image: "База изображение".to_owned(),
            rendered_image: "Картинка png".to_owned(),
            language_fields: vec![LanguageField::new(
                "База существительные слова",
                PartOfSpeech::Noun,
                WordForm::Word,
            )],
        }
    }

    /// Resolves a column name into its role and language.
    pub fn classify(&self, name: &str) -> Column {
        let (role, language) = self.resolve(name);
        Column {
            name: name.to_owned(),
            role,
            language: language.map(str::to_owned),
        }
    }

    /// Borrowing variant of [`ColumnGrammar::classify`].
    pub fn resolve<'a>(&self, name: &'a str) -> (ColumnRole, Option<&'a str>) {
        if let Some(role) = self.fixed_role(name) {
            return (role, None);
        }
        for field in &self.language_fields {
            if let Some(index) = name.find(field.prefix.as_str()) {
                // The language token must follow the prefix
                if last_token(&name[index + field.prefix.len()..]).is_none() {
                    return (ColumnRole::Unknown, None);
                }
                let role = ColumnRole::Translation {
                    part: field.part,
                    form: field.form,
                };
                return (role, last_token(name));
            }
        }
        (ColumnRole::Unknown, None)
    }

    fn fixed_role(&self, name: &str) -> Option<ColumnRole> {
        ColumnRole::BASE
            .into_iter()
            .find(|role| self.fixed_name(role) == Some(name))
    }

    fn fixed_name(&self, role: &ColumnRole) -> Option<&str> {
        match role {
            ColumnRole::Level => Some(self.level.as_str()),
            ColumnRole::LessonNumber => Some(self.lesson_number.as_str()),
            ColumnRole::LessonTitle => Some(self.lesson_title.as_str()),
            ColumnRole::BaseImage => Some(self.base_image.as_str()),
            ColumnRole::RenderedImage => Some(self.rendered_image.as_str()),
            _ => None,
        }
    }

    /// Builds the column name for a role. Language-scoped roles need a language;
    /// returns None when the grammar has no prefix for the role.
    pub fn column_name(&self, role: ColumnRole, language: Option<&str>) -> Option<String> {
        match role {
            ColumnRole::Translation { part, form } => {
                let field = self
                    .language_fields
                    .iter()
                    .find(|field| field.part == part && field.form == form)?;
                Some(format!("{} {}", field.prefix, language?))
            }
            ColumnRole::Unknown => None,
            fixed => self.fixed_name(&fixed).map(str::to_owned),
        }
    }
}
