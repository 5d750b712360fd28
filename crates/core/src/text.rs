//! String canonicalization helpers shared by the validation units.
//!
//! Everything here is char-based so accented Latin letters survive and
//! capitalize correctly ("électronique" -> "Électronique").

/// Trim a string; empty-after-trim collapses to `None`.
pub fn trim_to_option(value: Option<String>) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

/// Uppercase only the first letter, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Uppercase the first letter and lowercase the rest of the word.
pub fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Rebuild a value word by word with single spaces, applying `map` per word.
///
/// Word splitting collapses runs of whitespace, so the output is also the
/// canonical spacing of the input.
pub fn map_words(value: &str, mut map: impl FnMut(usize, &str) -> String) -> String {
    value
        .split_whitespace()
        .enumerate()
        .map(|(index, word)| map(index, word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_to_option_collapses_blank_to_absent() {
        assert_eq!(trim_to_option(Some("  ".to_string())), None);
        assert_eq!(trim_to_option(Some(String::new())), None);
        assert_eq!(
            trim_to_option(Some("  hola  ".to_string())),
            Some("hola".to_string())
        );
        assert_eq!(trim_to_option(None), None);
    }

    #[test]
    fn capitalize_first_leaves_tail_untouched() {
        assert_eq!(capitalize_first("venta a CLIENTE"), "Venta a CLIENTE");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn title_case_word_handles_accented_letters() {
        assert_eq!(title_case_word("électronique"), "Électronique");
        assert_eq!(title_case_word("GADGETS"), "Gadgets");
    }

    #[test]
    fn map_words_collapses_whitespace() {
        let out = map_words("  a   b  ", |_, w| w.to_string());
        assert_eq!(out, "a b");
    }
}
