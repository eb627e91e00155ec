//! Swedish collation for sorting names.
//!
//! Names compare letter by letter on a primary weight where case and most
//! diacritics are ignored, except that `å`, `ä` and `ö` are letters of
//! their own sorted after `z` (with `æ`/`ø` folded onto `ä`/`ö`). Ties on
//! the primary weight are broken by case, lower before upper, and finally
//! by the raw strings so the order is total.

use std::cmp::Ordering;

/// Character class, compared before the weight within the class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Ignorable,
    Digit,
    Letter,
    Other,
}

/// Letters after `z` in the Swedish alphabet
const A_RING: u32 = 27;
const A_UMLAUT: u32 = 28;
const O_UMLAUT: u32 = 29;

/// Fold a lowercase character onto its Swedish base letter
fn fold(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' => 'a',
        'ç' => 'c',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ó' | 'ò' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'û' => 'u',
        'ü' | 'ý' | 'ÿ' => 'y',
        'æ' => 'ä',
        'ø' => 'ö',
        _ => c,
    }
}

fn primary(c: char) -> (Class, u32) {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match fold(lower) {
        l @ 'a'..='z' => (Class::Letter, l as u32 - 'a' as u32 + 1),
        'å' => (Class::Letter, A_RING),
        'ä' => (Class::Letter, A_UMLAUT),
        'ö' => (Class::Letter, O_UMLAUT),
        d if d.is_ascii_digit() => (Class::Digit, d as u32),
        w if w.is_whitespace() || w.is_ascii_punctuation() => (Class::Ignorable, 0),
        other => (Class::Other, other as u32),
    }
}

fn primary_key(s: &str) -> Vec<(Class, u32)> {
    s.chars()
        .map(primary)
        .filter(|(class, _)| *class != Class::Ignorable)
        .collect()
}

/// Lowercase sorts before uppercase on otherwise equal strings
fn case_key(s: &str) -> Vec<bool> {
    s.chars()
        .filter(|c| c.is_alphabetic())
        .map(char::is_uppercase)
        .collect()
}

/// Compare two strings the way a Swedish phone book would
pub fn compare_sv(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&str]) -> Vec<String> {
        let mut v: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        v.sort_by(|a, b| compare_sv(a, b));
        v
    }

    #[test]
    fn test_swedish_letters_after_z() {
        assert_eq!(
            sorted(&["Öberg", "Zetterlund", "Åberg", "Ägren", "Andersson"]),
            vec!["Andersson", "Zetterlund", "Åberg", "Ägren", "Öberg"]
        );
    }

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(compare_sv("berg", "Lund"), Ordering::Less);
        assert_eq!(compare_sv("Berg", "lund"), Ordering::Less);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(compare_sv("andersson", "Andersson"), Ordering::Less);
        assert_eq!(compare_sv("Andersson", "andersson"), Ordering::Greater);
    }

    #[test]
    fn test_accents_fold_to_base_letter() {
        // é sorts with e, not after z
        assert_eq!(compare_sv("Édlund", "Fors"), Ordering::Less);
        // ü sorts as y
        assert_eq!(compare_sv("Müller", "Myrdal"), Ordering::Less);
        assert_eq!(compare_sv("Müller", "Mörner"), Ordering::Less);
        assert_eq!(primary_key("Møller"), primary_key("Möller"));
    }

    #[test]
    fn test_punctuation_is_ignored_at_primary_level() {
        assert_eq!(primary_key("Af Klint"), primary_key("af-klint"));
        assert_eq!(compare_sv("Af Klint", "Ahl"), Ordering::Less);
    }

    #[test]
    fn test_empty_sorts_first() {
        assert_eq!(compare_sv("", "Berg"), Ordering::Less);
        assert_eq!(compare_sv("", ""), Ordering::Equal);
    }

    #[test]
    fn test_total_order_is_consistent() {
        assert_eq!(compare_sv("Lund", "Lund"), Ordering::Equal);
        assert_ne!(compare_sv("Ek", "Ék"), Ordering::Equal);
    }
}
