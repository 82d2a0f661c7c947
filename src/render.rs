//! Publication detail pages.
//!
//! One standalone HTML document per record, in the layout of the site theme
//! the pages are dropped into (masthead, author sidebar, `page__*` article
//! classes). Rendering never fails: missing fields fall back to placeholders
//! (`Untitled`, `Unknown Author`, `n.d.`, `Unknown`) and optional fields
//! (volume, number, pages, DOI, URL) are left out of the page entirely.
//!
//! Uses [maud](https://maud.lambda.xyz/) so every interpolated value is
//! HTML-escaped.

use crate::authors::format_authors;
use crate::config::{AuthorConfig, SiteConfig, SiteInfo};
use crate::naming;
use crate::types::{PublicationLink, Record};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// A rendered detail page plus its index summary.
#[derive(Debug)]
pub struct PublicationPage {
    /// `YYYY-MM-slug.html`
    pub filename: String,
    pub html: Markup,
    pub link: PublicationLink,
}

/// Record values after placeholder substitution.
struct Details<'a> {
    title: &'a str,
    authors: String,
    year: &'a str,
    venue: &'a str,
    volume: Option<&'a str>,
    number: Option<&'a str>,
    pages: Option<&'a str>,
    doi: Option<&'a str>,
    url: Option<&'a str>,
}

impl<'a> Details<'a> {
    fn from_record(record: &'a Record) -> Self {
        Self {
            title: record.non_empty("title").unwrap_or("Untitled"),
            authors: format_authors(record.non_empty("author").unwrap_or("Unknown Author")),
            year: record.non_empty("year").unwrap_or("n.d."),
            venue: record.venue(),
            volume: record.non_empty("volume"),
            number: record.non_empty("number"),
            pages: record.non_empty("pages"),
            doi: record.non_empty("doi"),
            url: record.non_empty("url"),
        }
    }
}

/// Render the detail page for `record` and the summary used by the index.
pub fn render_publication(record: &Record, config: &SiteConfig) -> PublicationPage {
    let details = Details::from_record(record);
    let filename = naming::detail_filename(record);
    let permalink = config
        .site
        .publication_url(naming::page_stem(&filename));

    let html = detail_page(&details, &permalink, &config.site, &config.author);
    let link = PublicationLink {
        filename: filename.clone(),
        title: details.title.to_string(),
        journal: details.venue.to_string(),
        year: details.year.to_string(),
        entry_type: record.entry_type.clone(),
        authors: details.authors.clone(),
    };

    PublicationPage {
        filename,
        html,
        link,
    }
}

fn doi_url(doi: &str) -> String {
    format!("https://doi.org/{doi}")
}

/// schema.org `ScholarlyArticle` metadata, safe to embed in a `<script>`.
fn json_ld(details: &Details) -> String {
    let value = serde_json::json!({
        "@context": "http://schema.org",
        "@type": "ScholarlyArticle",
        "name": details.title,
        "author": details.authors,
        "datePublished": details.year,
    });
    value.to_string().replace("</", "<\\/")
}

// ============================================================================
// Page components
// ============================================================================

fn detail_page(details: &Details, permalink: &str, site: &SiteInfo, author: &AuthorConfig) -> Markup {
    let page_title = format!("{} - {}", details.title, site.title);
    let published = details
        .year
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| format!("{}-01-01T00:00:00+00:00", details.year));

    html! {
        (DOCTYPE)
        html lang="en" class="no-js" {
            head {
                meta charset="utf-8";
                title { (page_title) }
                meta name="description" content=(details.title);
                @if let Some(published) = published {
                    meta property="article:published_time" content=(published);
                }
                link rel="canonical" href=(permalink);
                script type="application/ld+json" { (PreEscaped(json_ld(details))) }
                meta property="og:locale" content=(site.locale);
                meta property="og:site_name" content=(site.title);
                meta property="og:title" content=(details.title);
                meta property="og:type" content="article";
                meta property="og:description" content=(details.title);
                meta property="og:url" content=(permalink);
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" href=(site.url(&site.stylesheet));
            }
            body {
                (masthead(site))
                div id="main" role="main" {
                    (sidebar(author, site))
                    article class="page" itemscope itemtype="http://schema.org/CreativeWork" {
                        meta itemprop="headline" content=(details.title);
                        meta itemprop="description" content=(details.authors);
                        meta itemprop="datePublished" content=(details.year);
                        div class="page__inner-wrap" {
                            header {
                                h1 class="page__title" itemprop="headline" { (details.title) }
                                p { "Published in " i { (details.venue) } ", " (details.year) }
                            }
                            (content_section(details))
                            footer class="page__meta" {
                                (citation(details))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn masthead(site: &SiteInfo) -> Markup {
    html! {
        div class="masthead" {
            div class="masthead__inner-wrap" {
                div class="masthead__menu" {
                    nav id="site-nav" class="greedy-nav" {
                        ul class="visible-links" {
                            li class="masthead__menu-item masthead__menu-item--lg persist" {
                                a href=(site.url("/")) { (site.title) }
                            }
                            @for link in &site.nav {
                                li class="masthead__menu-item" {
                                    a href=(site.url(&link.path)) { (link.title) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn sidebar(author: &AuthorConfig, site: &SiteInfo) -> Markup {
    html! {
        div class="sidebar sticky" {
            div itemscope itemtype="http://schema.org/Person" {
                @if !author.avatar.is_empty() {
                    div class="author__avatar" {
                        img src=(site.url(&author.avatar)) class="author__avatar" alt=(author.name);
                    }
                }
                div class="author__content" {
                    h3 class="author__name" { (author.name) }
                    @if !author.bio.is_empty() {
                        p class="author__bio" { (author.bio) }
                    }
                }
            }
        }
    }
}

fn content_section(details: &Details) -> Markup {
    html! {
        section class="page__content" itemprop="text" {
            h2 { "Authors" }
            p { (details.authors) }

            h2 { "Publication Details" }
            ul {
                li { strong { "Year:" } " " (details.year) }
                li { strong { "Journal/Venue:" } " " (details.venue) }
                @if let Some(volume) = details.volume {
                    li { strong { "Volume:" } " " (volume) }
                }
                @if let Some(pages) = details.pages {
                    li { strong { "Pages:" } " " (pages) }
                }
                @if let Some(doi) = details.doi {
                    li { strong { "DOI:" } " " a href=(doi_url(doi)) { (doi) } }
                }
            }
        }
    }
}

/// `Authors (year). "Title." <i>Venue</i>, vol (num) pp. pages` plus links.
fn citation(details: &Details) -> Markup {
    let has_links = details.url.is_some() || details.doi.is_some();

    html! {
        p style="font-size: smaller" {
            (details.authors) " (" (details.year) "). \"" (details.title) ".\" "
            i { (details.venue) } ","
            @if let Some(volume) = details.volume { " " (volume) }
            @if let Some(number) = details.number { " (" (number) ")" }
            @if let Some(pages) = details.pages { " pp. " (pages) }
            @if has_links {
                br;
                @if let Some(url) = details.url {
                    a href=(url) { "View Publication" }
                }
                @if details.url.is_some() && details.doi.is_some() { " | " }
                @if let Some(doi) = details.doi {
                    a href=(doi_url(doi)) { "DOI" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> Record {
        Record::new("article", "carraro2023")
            .with_field("title", "A Study of GF(2) Codes")
            .with_field("author", "A. Carraro and B. Smith")
            .with_field("year", "2023")
            .with_field("journal", "J. Coding")
            .with_field("volume", "12")
            .with_field("number", "3")
            .with_field("pages", "1--20")
            .with_field("doi", "10.1000/xyz")
            .with_field("url", "https://example.org/paper")
    }

    fn render(record: &Record) -> (String, PublicationLink) {
        let page = render_publication(record, &SiteConfig::default());
        (page.html.into_string(), page.link)
    }

    #[test]
    fn page_has_title_authors_and_venue() {
        let (html, _) = render(&full_record());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<h1 class="page__title" itemprop="headline">A Study of GF(2) Codes</h1>"#));
        assert!(html.contains("<p>A. Carraro and B. Smith</p>"));
        assert!(html.contains("Published in <i>J. Coding</i>, 2023"));
        assert!(html.contains("<title>A Study of GF(2) Codes - Your Name / Site Title</title>"));
    }

    #[test]
    fn optional_fields_rendered_when_present() {
        let (html, _) = render(&full_record());
        assert!(html.contains("<strong>Volume:</strong> 12"));
        assert!(html.contains("<strong>Pages:</strong> 1--20"));
        assert!(html.contains(r#"<a href="https://doi.org/10.1000/xyz">10.1000/xyz</a>"#));
        assert!(html.contains(r#"<a href="https://example.org/paper">View Publication</a> | "#));
        assert!(html.contains(" 12 (3) pp. 1--20"));
    }

    #[test]
    fn optional_fields_omitted_when_absent() {
        let record = Record::new("article", "k")
            .with_field("title", "Bare")
            .with_field("year", "2001");
        let (html, _) = render(&record);
        assert!(!html.contains("Volume:"));
        assert!(!html.contains("Pages:"));
        assert!(!html.contains("DOI"));
        assert!(!html.contains("View Publication"));
        assert!(!html.contains("<br>"));
    }

    #[test]
    fn placeholders_for_missing_fields() {
        let (html, link) = render(&Record::new("misc", "empty"));
        assert_eq!(link.title, "Untitled");
        assert_eq!(link.authors, "Unknown Author");
        assert_eq!(link.year, "n.d.");
        assert_eq!(link.journal, "Unknown");
        assert!(html.contains("Published in <i>Unknown</i>, n.d."));
        assert!(!html.contains("article:published_time"));
    }

    #[test]
    fn booktitle_used_as_venue() {
        let record = Record::new("inproceedings", "k")
            .with_field("title", "Talk")
            .with_field("booktitle", "Proc. Things");
        let (_, link) = render(&record);
        assert_eq!(link.journal, "Proc. Things");
        assert_eq!(link.entry_type, "inproceedings");
    }

    #[test]
    fn link_summary_matches_page() {
        let (_, link) = render(&full_record());
        assert_eq!(link.filename, "2023-01-a-study-of-gf2-codes.html");
        assert_eq!(link.title, "A Study of GF(2) Codes");
        assert_eq!(link.authors, "A. Carraro and B. Smith");
        assert_eq!(link.year, "2023");
    }

    #[test]
    fn canonical_url_uses_base_path() {
        let mut config = SiteConfig::default();
        config.site.base_path = "/albertocarraro".to_string();
        let page = render_publication(&full_record(), &config);
        let html = page.html.into_string();
        assert!(html.contains(
            r#"<link rel="canonical" href="/albertocarraro/publication/2023-01-a-study-of-gf2-codes">"#
        ));
        assert!(html.contains(r#"href="/albertocarraro/assets/css/main.css""#));
    }

    #[test]
    fn json_ld_is_valid_and_escaped() {
        let record = Record::new("article", "k").with_field("title", "</script> trick");
        let details = Details::from_record(&record);
        let ld = json_ld(&details);
        assert!(!ld.contains("</script>"));
        let parsed: serde_json::Value = serde_json::from_str(&ld).unwrap();
        assert_eq!(parsed["@type"], "ScholarlyArticle");
        assert_eq!(parsed["name"], "</script> trick");
    }

    #[test]
    fn html_escape_in_maud() {
        let record = Record::new("article", "k").with_field("title", "<b>Bold</b> & more");
        let (html, _) = render(&record);
        assert!(html.contains("&lt;b&gt;Bold&lt;/b&gt; &amp; more"));
    }

    #[test]
    fn sidebar_skips_empty_avatar_and_bio() {
        let author = AuthorConfig::default();
        let html = sidebar(&author, &SiteInfo::default()).into_string();
        assert!(html.contains("Your Name"));
        assert!(!html.contains("author__avatar"));
        assert!(!html.contains("author__bio"));
    }

    #[test]
    fn masthead_lists_nav_links() {
        let html = masthead(&SiteInfo::default()).into_string();
        assert!(html.contains(r#"<a href="/publications/">Publications</a>"#));
        assert!(html.contains(r#"<a href="/cv/">CV</a>"#));
    }
}
