//! Bibliography parsing: entry segmentation, field extraction, markup cleaning.
//!
//! Only the subset of BibTeX that hand-maintained publication lists actually
//! use is understood:
//!
//! ```text
//! @article{carraro2023,
//!   title   = {A Study of {GF}(2) Codes},
//!   author  = "A. Carraro and B. Smith",
//!   year    = {2023},
//! }
//! ```
//!
//! - Values must be wrapped in braces (nesting allowed) or double quotes (no
//!   nesting, no escapes). Bare values such as `year = 2023` are skipped.
//! - A field name that repeats within an entry keeps its last value.
//! - Nothing here returns an error: malformed fields are skipped and malformed
//!   entries are dropped, so a single bad entry never blocks a site build.
//!
//! Parsed records come back sorted by descending numeric year, with missing or
//! non-numeric years last. The sort is stable, so entries sharing a year keep
//! their order from the file.

use crate::types::Record;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// `@<type>{<key>,`
static ENTRY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)\{([^,]+),").expect("entry header pattern is valid"));

/// A line holding nothing but the entry's closing brace.
static CLOSING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\}[ \t]*\r?$").expect("closing line pattern is valid"));

/// `<name> =` with optional whitespace on both sides of the `=`.
static FIELD_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)\s*=\s*").expect("field name pattern is valid"));

/// A brace group with no braces inside it.
static INNERMOST_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("group pattern is valid"));

/// Parse every entry in `text`, sorted by descending year.
pub fn parse_bibliography(text: &str) -> Vec<Record> {
    let mut records = Vec::new();
    let mut pos = 0;

    while let Some(caps) = ENTRY_HEADER.captures(&text[pos..]) {
        let (Some(header), Some(entry_type), Some(key)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            break;
        };
        let open_brace = pos + header.start() + 1 + entry_type.len();
        let body_start = pos + header.end();

        // A block with no comma (`@string{..}`, `@misc{nokey}`) lets the key
        // run on into the next entry's header. Resume inside the block.
        if matching_brace(text, open_brace).is_some_and(|close| close < body_start) {
            debug!(entry_type = entry_type.as_str(), "skipping block without a citation key");
            pos = open_brace + 1;
            continue;
        }

        let key = key.as_str().trim();
        let Some(body_end) = entry_end(text, open_brace, body_start) else {
            debug!(key, "skipping unterminated entry");
            pos = body_start;
            continue;
        };
        pos = body_end + 1;

        if key.is_empty() {
            debug!("skipping entry with an empty citation key");
            continue;
        }

        records.push(Record {
            entry_type: entry_type.as_str().to_lowercase(),
            key: key.to_string(),
            fields: parse_fields(&text[body_start..body_end]),
        });
    }

    records.sort_by_key(|r| Reverse(r.sort_year()));
    records
}

/// Byte offset of the brace that closes the entry opened at `open_brace`.
///
/// The entry ends at whichever comes first: the brace matching the opening
/// one, or a line consisting of a lone `}`. The second form keeps an entry with
/// an unbalanced brace in one of its values from swallowing the next entry.
fn entry_end(text: &str, open_brace: usize, body_start: usize) -> Option<usize> {
    let matched = matching_brace(text, open_brace).filter(|&close| close >= body_start);
    let line = CLOSING_LINE
        .find(&text[body_start..])
        .map(|m| body_start + m.start());

    match (matched, line) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// Index of the `}` matching the `{` at `open`, tracking nesting depth.
fn matching_brace(s: &str, open: usize) -> Option<usize> {
    debug_assert_eq!(s.as_bytes().get(open), Some(&b'{'));
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extract `name = value` pairs from an entry body.
pub fn parse_fields(body: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let mut pos = 0;

    while pos < body.len() {
        let Some(caps) = FIELD_NAME.captures(&body[pos..]) else {
            break;
        };
        let (Some(assignment), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let value_start = pos + assignment.end();

        match scan_value(&body[value_start..]) {
            Some(len) => {
                let raw = &body[value_start..value_start + len];
                fields.insert(name.as_str().to_lowercase(), clean_value(raw));
                pos = value_start + len;
            }
            None => {
                debug!(field = name.as_str(), "no braced or quoted value");
                pos += body[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    fields
}

/// Length of the delimited value at the start of `s`, delimiters included.
fn scan_value(s: &str) -> Option<usize> {
    match s.as_bytes().first()? {
        b'{' => matching_brace(s, 0).map(|close| close + 1),
        b'"' => s[1..].find('"').map(|close| close + 2),
        _ => None,
    }
}

/// Drop the value's own delimiters, then clean what is inside.
fn clean_value(raw: &str) -> String {
    let raw = raw.trim();
    let inner = if raw.len() >= 2
        && ((raw.starts_with('"') && raw.ends_with('"'))
            || (raw.starts_with('{') && raw.ends_with('}')))
    {
        &raw[1..raw.len() - 1]
    } else {
        raw
    };
    clean_markup(inner.trim()).trim().to_string()
}

/// Remove brace grouping markup and normalize whitespace.
///
/// Each pass strips one brace pair enclosing the whole string, then unwraps
/// every innermost `{...}` group. Passes repeat until no `{` is left. A pass
/// that changes nothing ends the loop early, which leaves stray braces from
/// unbalanced input in place rather than spinning.
///
/// ```
/// use pubpages::bibtex::clean_markup;
///
/// assert_eq!(clean_markup("{A Study of {{GF}}(2)   Codes}"), "A Study of GF(2) Codes");
/// ```
pub fn clean_markup(text: &str) -> String {
    let mut text = text.to_string();

    while text.contains('{') {
        let before = text.clone();
        let unwrapped = strip_enclosing_braces(&text);
        text = INNERMOST_GROUP.replace_all(unwrapped, "$1").into_owned();
        if text == before {
            break;
        }
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `{...}` → `...` when the first brace closes at the very end of the string.
fn strip_enclosing_braces(text: &str) -> &str {
    if text.starts_with('{') && matching_brace(text, 0) == Some(text.len() - 1) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
