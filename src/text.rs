use crate::alphabet::Alphabet;

/// Letters replaced before filtering, after uppercasing
const FOLDS: &[(char, char)] = &[('Ё', 'Е')];

/// Prepares free text for the codecs: uppercases it, folds Ё into Е and
/// drops everything that is not a letter of the alphabet run.
pub fn normalize(text: &str, alphabet: &Alphabet) -> String {
    text.chars()
        .flat_map(char::to_uppercase)
        .map(|ch| {
            FOLDS
                .iter()
                .find(|(from, _)| *from == ch)
                .map_or(ch, |&(_, to)| to)
        })
        .filter(|&ch| alphabet.offset(ch).is_some())
        .collect()
}

/// Removes a single trailing line break
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}
