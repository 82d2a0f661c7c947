//! Publications index page.
//!
//! The index page belongs to the site theme and is edited by hand, so only
//! its archive region is regenerated. Everything before [`START_ANCHOR`] is
//! kept as the header and everything from [`END_ANCHOR`] on is kept as the
//! footer:
//!
//! ```text
//! <html> ... masthead ... sidebar ...        ← header, kept verbatim
//! <div class="archive">                       ← START_ANCHOR
//!   <h1>Publications</h1>
//!   <h2>Journal Articles</h2> ...             ← regenerated
//! </div>
//! </div>
//!   </div>\n</div>\n\n\n    <div class="page__footer">   ← END_ANCHOR, footer kept
//! ```
//!
//! The regenerated region starts with [`START_ANCHOR`] itself, so running the
//! generator again finds the same split points and produces the same file.

use crate::config::{IndexConfig, SiteInfo};
use crate::naming;
use crate::types::{PublicationKind, PublicationLink};
use maud::{Markup, html};

/// First line of the regenerated region.
pub const START_ANCHOR: &str = r#"<div class="archive">"#;

/// Start of the theme footer that follows the region.
pub const END_ANCHOR: &str = "  </div>\n</div>\n\n\n    <div class=\"page__footer\">";

/// Non-empty groups in display order. Entries keep their input order.
pub fn group_links(links: &[PublicationLink]) -> Vec<(PublicationKind, Vec<&PublicationLink>)> {
    PublicationKind::DISPLAY_ORDER
        .iter()
        .map(|&kind| {
            let entries: Vec<_> = links.iter().filter(|l| l.kind() == kind).collect();
            (kind, entries)
        })
        .filter(|(_, entries)| !entries.is_empty())
        .collect()
}

/// The archive block: page title, optional intro, one section per group.
pub fn render_archive(links: &[PublicationLink], site: &SiteInfo, index: &IndexConfig) -> Markup {
    html! {
        div class="archive" {
            h1 class="page__title" { "Publications" }
            @if let Some(url) = &index.scholar_url {
                div class="wordwrap" {
                    "You can also find my articles on "
                    a href=(url) { "my Google Scholar profile" }
                    "."
                }
            }
            @for (kind, entries) in group_links(links) {
                h2 { (kind.heading()) }
                hr;
                @for link in entries {
                    (archive_item(link, site))
                }
            }
        }
    }
}

fn archive_item(link: &PublicationLink, site: &SiteInfo) -> Markup {
    let href = site.publication_url(naming::page_stem(&link.filename));
    html! {
        div class="list__item" {
            article class="archive__item" itemscope itemtype="http://schema.org/CreativeWork" {
                h2 class="archive__item-title" itemprop="headline" {
                    a href=(href) rel="permalink" { (link.title) }
                }
                p { "Published in " i { (link.journal) } ", " (link.year) }
                p class="archive__item-excerpt" itemprop="description" { (link.authors) }
            }
        }
    }
}

/// Replace the archive region of `original` with `region`.
///
/// Without a start anchor the whole document counts as header and the region
/// is appended. The end anchor is only searched for after the start anchor;
/// when it is missing there is no footer.
pub fn splice(original: &str, region: &str) -> String {
    let header_end = original.find(START_ANCHOR).unwrap_or(original.len());
    let header = &original[..header_end];
    let footer = original[header_end..]
        .find(END_ANCHOR)
        .map_or("", |offset| &original[header_end + offset..]);

    let mut out = String::with_capacity(header.len() + region.len() + footer.len());
    out.push_str(header);
    out.push_str(region);
    out.push_str(footer);
    out
}

/// Rebuild the full index document from its previous contents.
pub fn render_index_document(
    original: &str,
    links: &[PublicationLink],
    site: &SiteInfo,
    index: &IndexConfig,
) -> String {
    // The archive block plus the close of the container that wraps it.
    let region = format!(
        "{}\n</div>\n",
        render_archive(links, site, index).into_string()
    );
    splice(original, &region)
}
