//! Filename derivation for publication detail pages.
//!
//! Every record gets a stable filename of the form `YYYY-MM-slug.html`:
//!
//! - `YYYY` is the `year` field as written, or `2020` when absent.
//! - `MM` comes from the `month` field (`jan`, `March`, `7`, ...), defaulting
//!   to `01`.
//! - `slug` is the first five alphanumeric words of the lower-cased title.
//!
//! ```text
//! title = {A Study of {GF}(2) Codes}, year = {2023}
//!   → 2023-01-a-study-of-gf2-codes.html
//! ```
//!
//! Two titles sharing their first five words map to the same file; the later
//! record overwrites the earlier one.

use crate::types::Record;

const DEFAULT_YEAR: &str = "2020";
const DEFAULT_MONTH: &str = "01";
const SLUG_WORDS: usize = 5;

const MONTHS: [(&str, &str, &str); 12] = [
    ("jan", "january", "01"),
    ("feb", "february", "02"),
    ("mar", "march", "03"),
    ("apr", "april", "04"),
    ("may", "may", "05"),
    ("jun", "june", "06"),
    ("jul", "july", "07"),
    ("aug", "august", "08"),
    ("sep", "september", "09"),
    ("oct", "october", "10"),
    ("nov", "november", "11"),
    ("dec", "december", "12"),
];

/// `YYYY-MM` prefix for a record's filename.
pub fn filename_date(record: &Record) -> String {
    let year = record.non_empty("year").unwrap_or(DEFAULT_YEAR);
    let month = record.non_empty("month").map_or(DEFAULT_MONTH.to_string(), month_number);
    format!("{year}-{month}")
}

/// Two-digit month for a month name or number; `01` when unrecognized.
pub fn month_number(month: &str) -> String {
    let month = month.trim();
    let lower = month.to_lowercase();
    if let Some((_, _, number)) = MONTHS
        .iter()
        .find(|(short, long, _)| lower == *short || lower == *long)
    {
        return number.to_string();
    }

    if !month.is_empty() && month.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n @ 1..=12) = month.parse::<u32>() {
            return format!("{n:02}");
        }
    }
    DEFAULT_MONTH.to_string()
}

/// URL slug from the record's title (`untitled` when missing).
pub fn slug(record: &Record) -> String {
    slug_from_title(record.non_empty("title").unwrap_or("untitled"))
}

/// Keep `a-z`, `0-9` and whitespace of the lower-cased title, then join the
/// first five words with `-`.
pub fn slug_from_title(title: &str) -> String {
    let kept: String = title
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .take(SLUG_WORDS)
        .collect::<Vec<_>>()
        .join("-")
}

/// `YYYY-MM-slug.html`
///
/// The year is taken verbatim, so a value such as `2023/24` yields a name
/// with a path separator in it. Check with [`is_plain_filename`] before
/// joining it onto a directory.
pub fn detail_filename(record: &Record) -> String {
    format!("{}-{}.html", filename_date(record), slug(record))
}

/// True when `name` is a single path component: no separators, not `.` or `..`.
pub fn is_plain_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// Filename without its `.html` extension, as used in permalinks.
pub fn page_stem(filename: &str) -> &str {
    filename.strip_suffix(".html").unwrap_or(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, &str)]) -> Record {
        fields
            .iter()
            .fold(Record::new("article", "k"), |r, (name, value)| {
                r.with_field(name, value)
            })
    }

    // =========================================================================
    // Dates
    // =========================================================================

    #[test]
    fn date_defaults_when_fields_missing() {
        assert_eq!(filename_date(&record(&[])), "2020-01");
    }

    #[test]
    fn date_uses_year_verbatim() {
        assert_eq!(filename_date(&record(&[("year", "1999")])), "1999-01");
    }

    #[test]
    fn month_short_and_long_names() {
        assert_eq!(month_number("jan"), "01");
        assert_eq!(month_number("Sep"), "09");
        assert_eq!(month_number("SEPTEMBER"), "09");
        assert_eq!(month_number("may"), "05");
        assert_eq!(month_number("December"), "12");
    }

    #[test]
    fn month_numeric_is_zero_padded() {
        assert_eq!(month_number("3"), "03");
        assert_eq!(month_number("11"), "11");
        assert_eq!(month_number("07"), "07");
    }

    #[test]
    fn month_out_of_range_or_unknown_defaults() {
        assert_eq!(month_number("13"), "01");
        assert_eq!(month_number("0"), "01");
        assert_eq!(month_number("Spring"), "01");
        assert_eq!(month_number(""), "01");
        assert_eq!(month_number("-4"), "01");
    }

    #[test]
    fn date_with_month_field() {
        let r = record(&[("year", "2021"), ("month", "Oct")]);
        assert_eq!(filename_date(&r), "2021-10");
    }

    #[test]
    fn month_part_always_in_range() {
        for month in ["jan", "feb", "1", "12", "99", "x", "june", "00"] {
            let date = filename_date(&record(&[("year", "2000"), ("month", month)]));
            let mm: u32 = date[5..].parse().unwrap();
            assert!((1..=12).contains(&mm), "{month} → {date}");
        }
    }

    // =========================================================================
    // Slugs
    // =========================================================================

    #[test]
    fn slug_strips_punctuation() {
        assert_eq!(slug_from_title("A Study of GF(2) Codes"), "a-study-of-gf2-codes");
    }

    #[test]
    fn slug_takes_first_five_words() {
        assert_eq!(
            slug_from_title("One two three four five six seven"),
            "one-two-three-four-five"
        );
    }

    #[test]
    fn slug_drops_non_ascii_letters() {
        assert_eq!(slug_from_title("Über die Lösung"), "ber-die-lsung");
    }

    #[test]
    fn slug_untitled_default() {
        assert_eq!(slug(&record(&[])), "untitled");
    }

    #[test]
    fn detail_filename_example() {
        let r = record(&[("title", "A Study of GF(2) Codes"), ("year", "2023")]);
        assert_eq!(detail_filename(&r), "2023-01-a-study-of-gf2-codes.html");
    }

    #[test]
    fn empty_year_and_title_use_defaults() {
        let r = record(&[("year", ""), ("title", ""), ("month", "")]);
        assert_eq!(detail_filename(&r), "2020-01-untitled.html");
    }

    #[test]
    fn plain_filename_check() {
        assert!(is_plain_filename("2023-01-paper.html"));
        assert!(!is_plain_filename("2023/24-01-paper.html"));
        assert!(!is_plain_filename("..\\x-01-paper.html"));
        assert!(!is_plain_filename(".."));
        assert!(!is_plain_filename(""));
    }

    #[test]
    fn page_stem_strips_extension() {
        assert_eq!(page_stem("2023-01-x.html"), "2023-01-x");
        assert_eq!(page_stem("noext"), "noext");
    }
}
