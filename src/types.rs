//! Shared types passed between the parser and the renderers.
//!
//! A [`Record`] is created once by [`crate::bibtex`] and only ever read after
//! that. Rendering a record yields a [`PublicationLink`], the compact summary
//! the index is built from.

use serde::Serialize;
use std::collections::BTreeMap;

/// One bibliographic entry: `@<entry_type>{<key>, <fields>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Lower-cased word after `@` (`article`, `inproceedings`, ...).
    pub entry_type: String,
    /// Citation key.
    pub key: String,
    /// Lower-cased field name → cleaned value.
    pub fields: BTreeMap<String, String>,
}

impl Record {
    /// Record with no fields.
    pub fn new(entry_type: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            entry_type: entry_type.into(),
            key: key.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set `name` (lower-cased) to `value`, replacing any earlier value.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_lowercase(), value.to_string());
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Field value, treating an empty string the same as a missing field.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.field(name).filter(|v| !v.is_empty())
    }

    /// Numeric year used for ordering. Missing or non-numeric years are 0.
    pub fn sort_year(&self) -> i64 {
        self.field("year")
            .and_then(|y| y.trim().parse::<i64>().ok())
            .unwrap_or(0)
    }

    /// Journal, falling back to the proceedings/book title, then `"Unknown"`.
    pub fn venue(&self) -> &str {
        self.non_empty("journal")
            .or_else(|| self.non_empty("booktitle"))
            .unwrap_or("Unknown")
    }
}

/// Summary of a rendered publication, accumulated for the index page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicationLink {
    /// Detail page filename, `YYYY-MM-slug.html`.
    pub filename: String,
    pub title: String,
    pub journal: String,
    pub year: String,
    pub entry_type: String,
    /// Display string from [`crate::authors::format_authors`].
    pub authors: String,
}

impl PublicationLink {
    pub fn kind(&self) -> PublicationKind {
        PublicationKind::from_entry_type(&self.entry_type)
    }
}

/// Display group on the index page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicationKind {
    Article,
    Chapter,
    Conference,
    Thesis,
    Other,
}

impl PublicationKind {
    /// Groups in the order they appear on the index page.
    pub const DISPLAY_ORDER: [PublicationKind; 5] = [
        PublicationKind::Article,
        PublicationKind::Chapter,
        PublicationKind::Conference,
        PublicationKind::Thesis,
        PublicationKind::Other,
    ];

    pub fn from_entry_type(entry_type: &str) -> Self {
        match entry_type.to_ascii_lowercase().as_str() {
            "article" => PublicationKind::Article,
            "incollection" => PublicationKind::Chapter,
            "inproceedings" | "conference" => PublicationKind::Conference,
            "phdthesis" => PublicationKind::Thesis,
            _ => PublicationKind::Other,
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            PublicationKind::Article => "Journal Articles",
            PublicationKind::Chapter => "Book Chapters",
            PublicationKind::Conference => "Conference Papers",
            PublicationKind::Thesis => "Theses",
            PublicationKind::Other => "Other Publications",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_year_numeric() {
        let r = Record::new("article", "k").with_field("year", "2023");
        assert_eq!(r.sort_year(), 2023);
    }

    #[test]
    fn sort_year_missing_or_garbage_is_zero() {
        assert_eq!(Record::new("article", "k").sort_year(), 0);
        let r = Record::new("article", "k").with_field("year", "forthcoming");
        assert_eq!(r.sort_year(), 0);
    }

    #[test]
    fn venue_prefers_journal() {
        let r = Record::new("article", "k")
            .with_field("journal", "J. Coding")
            .with_field("booktitle", "Proc. X");
        assert_eq!(r.venue(), "J. Coding");
    }

    #[test]
    fn venue_falls_back_to_booktitle_then_unknown() {
        let r = Record::new("inproceedings", "k").with_field("booktitle", "Proc. X");
        assert_eq!(r.venue(), "Proc. X");
        assert_eq!(Record::new("misc", "k").venue(), "Unknown");
    }

    #[test]
    fn empty_journal_is_treated_as_missing() {
        let r = Record::new("article", "k")
            .with_field("journal", "")
            .with_field("booktitle", "Proc. X");
        assert_eq!(r.venue(), "Proc. X");
    }

    #[test]
    fn kind_mapping() {
        assert_eq!(PublicationKind::from_entry_type("article"), PublicationKind::Article);
        assert_eq!(PublicationKind::from_entry_type("incollection"), PublicationKind::Chapter);
        assert_eq!(PublicationKind::from_entry_type("conference"), PublicationKind::Conference);
        assert_eq!(PublicationKind::from_entry_type("inproceedings"), PublicationKind::Conference);
        assert_eq!(PublicationKind::from_entry_type("phdthesis"), PublicationKind::Thesis);
        assert_eq!(PublicationKind::from_entry_type("misc"), PublicationKind::Other);
        assert_eq!(PublicationKind::from_entry_type("book"), PublicationKind::Other);
        assert_eq!(PublicationKind::from_entry_type("techreport"), PublicationKind::Other);
    }
}
