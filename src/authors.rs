//! Author list formatting.
//!
//! BibTeX joins authors with the word `and`. Names are kept exactly as written;
//! no first/last splitting is attempted.

/// Split on ` and ` (any surrounding whitespace) and join for display.
///
/// - `""` → `""`
/// - `"A"` → `"A"`
/// - `"A and B"` → `"A and B"`
/// - `"A and B and C"` → `"A, B, and C"`
pub fn format_authors(raw: &str) -> String {
    let authors = split_authors(raw);

    match authors.as_slice() {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

fn split_authors(raw: &str) -> Vec<&str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    let mut authors = Vec::new();
    let mut rest = raw;
    while let Some((name, tail)) = split_once_on_and(rest) {
        authors.push(name.trim());
        rest = tail;
    }
    authors.push(rest.trim());
    authors
}

/// Split at the first standalone `and` token.
fn split_once_on_and(s: &str) -> Option<(&str, &str)> {
    let mut search_from = 0;
    while let Some(found) = s[search_from..].find("and") {
        let start = search_from + found;
        let end = start + "and".len();
        let before = s[..start].chars().next_back();
        let after = s[end..].chars().next();
        if before.is_some_and(char::is_whitespace) && after.is_some_and(char::is_whitespace) {
            return Some((&s[..start], &s[end..]));
        }
        search_from = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_authors() {
        assert_eq!(format_authors(""), "");
        assert_eq!(format_authors("   "), "");
    }

    #[test]
    fn one_author() {
        assert_eq!(format_authors("Ada Lovelace"), "Ada Lovelace");
    }

    #[test]
    fn two_authors() {
        assert_eq!(format_authors("A. Carraro and B. Smith"), "A. Carraro and B. Smith");
    }

    #[test]
    fn three_authors_oxford_comma() {
        assert_eq!(format_authors("X and Y and Z"), "X, Y, and Z");
    }

    #[test]
    fn four_authors() {
        assert_eq!(format_authors("W and X and Y and Z"), "W, X, Y, and Z");
    }

    #[test]
    fn and_inside_a_name_is_not_a_separator() {
        assert_eq!(
            format_authors("Alexander Sandberg and Randall Anderson"),
            "Alexander Sandberg and Randall Anderson"
        );
        assert_eq!(format_authors("Sandra Andrews"), "Sandra Andrews");
    }

    #[test]
    fn names_are_trimmed() {
        assert_eq!(format_authors("  Doe, J.   and   Roe, R.  and Poe, E. "), "Doe, J., Roe, R., and Poe, E.");
    }

    #[test]
    fn placeholder_passes_through() {
        assert_eq!(format_authors("Unknown Author"), "Unknown Author");
    }
}
