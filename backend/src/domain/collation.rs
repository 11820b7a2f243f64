//! Locale-aware string ordering for the description column.
//!
//! Strings are compared the way a dictionary orders them rather than by code
//! point, in three passes:
//!
//! 1. **Primary**: base letters, ignoring case and accents. Whitespace sorts
//!    before punctuation, punctuation before digits, digits before letters.
//! 2. **Secondary**: unaccented before accented (`cafe` < `café`).
//! 3. **Tertiary**: lowercase before uppercase (`apple` < `Apple`).
//!
//! Strings equal on all three levels fall back to code point order so the
//! result is a total order.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

#[derive(Debug, Clone, Copy)]
struct CollationElement {
    class: CharClass,
    base: char,
    accented: bool,
    uppercase: bool,
}

impl CollationElement {
    fn new(c: char) -> Self {
        let uppercase = c.is_uppercase();
        let lower = c.to_lowercase().next().unwrap_or(c);
        let (base, accented) = match strip_accent(lower) {
            Some(base) => (base, true),
            None => (lower, false),
        };
        let class = if c.is_whitespace() {
            CharClass::Whitespace
        } else if c.is_numeric() {
            CharClass::Digit
        } else if c.is_alphabetic() {
            CharClass::Letter
        } else {
            CharClass::Punctuation
        };

        Self {
            class,
            base,
            accented,
            uppercase,
        }
    }

    fn primary(&self) -> (CharClass, char) {
        (self.class, self.base)
    }
}

/// Compare two strings in dictionary order.
pub fn compare(a: &str, b: &str) -> Ordering {
    let left: Vec<CollationElement> = a.chars().map(CollationElement::new).collect();
    let right: Vec<CollationElement> = b.chars().map(CollationElement::new).collect();

    compare_level(&left, &right, |e| e.primary())
        .then_with(|| compare_level(&left, &right, |e| e.accented))
        .then_with(|| compare_level(&left, &right, |e| e.uppercase))
        .then_with(|| a.cmp(b))
}

fn compare_level<K: Ord>(
    left: &[CollationElement],
    right: &[CollationElement],
    key: impl Fn(&CollationElement) -> K,
) -> Ordering {
    left.iter().map(&key).cmp(right.iter().map(&key))
}

/// Base letter for accented Latin lowercase letters, `None` if unaccented.
fn strip_accent(c: char) -> Option<char> {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        words.sort_by(|a, b| compare(a, b));
        words
    }

    #[test]
    fn test_case_does_not_dominate_order() {
        // Code point order would put every capitalised word first
        assert_eq!(sorted(&["banana", "Apple", "cherry"]), vec!["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_lowercase_before_uppercase_on_tie() {
        assert_eq!(compare("apple", "Apple"), Ordering::Less);
        assert_eq!(compare("Apple", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_accents_are_secondary() {
        assert_eq!(sorted(&["cafes", "café", "cafe"]), vec!["cafe", "café", "cafes"]);
        assert_eq!(compare("Éclair", "eclairs"), Ordering::Less);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare("Rent", "Rental"), Ordering::Less);
    }

    #[test]
    fn test_digits_before_letters_and_space_before_punctuation() {
        assert_eq!(compare("2 tickets", "Bus"), Ordering::Less);
        assert_eq!(compare("a b", "a-b"), Ordering::Less);
        assert_eq!(compare("a_b", "ab"), Ordering::Less);
    }

    #[test]
    fn test_identical_strings_are_equal() {
        assert_eq!(compare("Groceries", "Groceries"), Ordering::Equal);
        assert_eq!(compare("", ""), Ordering::Equal);
        assert_eq!(compare("", "a"), Ordering::Less);
    }
}
