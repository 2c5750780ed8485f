use crate::helpers::string::non_blank;
use crate::lesson::Word;
use crate::table::column::ColumnGrammar;
use crate::table::row::Row;
use std::collections::BTreeMap;

/// Builds a [`Word`] from a word row.
///
/// Images come from the fixed image columns (a missing rendered image becomes
/// an empty string). Every translation column with a non-blank cell contributes
/// `translations[language.to_lowercase()] = cell`; blank cells are left out, which
/// is how a language not covered by the lesson is represented.
pub fn extract(grammar: &ColumnGrammar, row: &Row) -> Word {
    let mut translations = BTreeMap::new();
    for (name, value) in row.iter() {
        let (role, language) = grammar.resolve(name);
        if !role.is_translation() {
            continue;
        }
        if let (Some(language), Some(value)) = (language, non_blank(Some(value))) {
            translations.insert(language.to_lowercase(), value.to_owned());
        }
    }
    Word {
        image_base: row.get(&grammar.base_image).unwrap_or_default().to_owned(),
        image_png: row.get(&grammar.rendered_image).unwrap_or_default().to_owned(),
        translations,
    }
}
