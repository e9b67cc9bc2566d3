//! Утилиты обработки строк для поиска и форм

/// Приводит строку к поисковой форме: нижний регистр, без диакритики
/// и без пробельных символов.
///
/// "Membrána" и "membrana" дают одну форму, "Puerta Principal" находится
/// по запросу "puertaprincipal".
pub fn normalize_search(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .map(strip_diacritic)
        .collect()
}

fn strip_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        'ç' => 'c',
        _ => c,
    }
}

/// Первая буква — заглавная, остальное без изменений.
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_diacritics() {
        assert_eq!(normalize_search("Membrána"), "membrana");
        assert_eq!(normalize_search("MEMBRANA"), "membrana");
        assert_eq!(normalize_search("Poliéster"), "poliester");
    }

    #[test]
    fn normalize_strips_whitespace() {
        assert_eq!(normalize_search("Puerta Principal"), "puertaprincipal");
        assert_eq!(normalize_search("  doble\tvidrio "), "doblevidrio");
    }

    #[test]
    fn normalize_keeps_digits_and_punctuation() {
        assert_eq!(normalize_search("120x210cm"), "120x210cm");
        assert_eq!(normalize_search("Color:Rojo"), "color:rojo");
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize_first("puertas"), "Puertas");
        assert_eq!(capitalize_first("Ya Mayúscula"), "Ya Mayúscula");
        assert_eq!(capitalize_first(""), "");
    }
}
