//! Site generation: bibliography in, HTML pages and index out.
//!
//! ## Steps
//!
//! 1. Read and parse the bibliography (see [`crate::bibtex`]).
//! 2. Create the output directory and delete the theme's placeholder pages
//!    listed in `cleanup.legacy_files`.
//! 3. Write one `YYYY-MM-slug.html` detail page per record.
//! 4. Regenerate the archive region of the existing index page.
//!
//! Every file is written whole, so running twice on the same input leaves
//! identical files behind. An I/O failure aborts the run; pages already
//! written stay on disk.
//!
//! Progress is reported through [`BuildEvent`]s so the caller decides how to
//! display it (see [`crate::output`]).

use crate::bibtex;
use crate::config::{PathsConfig, SiteConfig};
use crate::index;
use crate::naming;
use crate::render;
use crate::types::{PublicationLink, Record};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Progress notifications emitted while building.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    Parsed { count: usize },
    LegacyDeleted { filename: String },
    PageWritten { filename: String, title: String },
    IndexWritten { path: PathBuf },
    Finished { count: usize, output_dir: PathBuf },
}

/// Summary of a completed build.
#[derive(Debug)]
pub struct BuildReport {
    pub links: Vec<PublicationLink>,
    pub deleted: Vec<String>,
}

/// Read and parse the bibliography at `path`.
pub fn load_records(path: &Path) -> Result<Vec<Record>, GenerateError> {
    let text = fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let records = bibtex::parse_bibliography(&text);
    info!(count = records.len(), path = %path.display(), "parsed bibliography");
    Ok(records)
}

/// Run the whole pipeline. `paths` must already be resolved against the site
/// root (see [`PathsConfig::resolve`]).
pub fn build(
    paths: &PathsConfig,
    config: &SiteConfig,
    mut on_event: impl FnMut(BuildEvent),
) -> Result<BuildReport, GenerateError> {
    let records = load_records(&paths.bibliography)?;
    on_event(BuildEvent::Parsed {
        count: records.len(),
    });

    let output_dir = &paths.output_dir;
    fs::create_dir_all(output_dir).map_err(|source| GenerateError::Write {
        path: output_dir.clone(),
        source,
    })?;

    let deleted = remove_legacy_files(output_dir, &config.cleanup.legacy_files)?;
    for filename in &deleted {
        on_event(BuildEvent::LegacyDeleted {
            filename: filename.clone(),
        });
    }

    let mut links = Vec::with_capacity(records.len());
    for record in &records {
        let page = render::render_publication(record, config);
        if !naming::is_plain_filename(&page.filename) {
            warn!(
                key = %record.key,
                filename = %page.filename,
                "skipping entry whose filename is not a plain name"
            );
            continue;
        }
        let path = output_dir.join(&page.filename);
        write_file(&path, &page.html.into_string())?;
        debug!(key = %record.key, path = %path.display(), "wrote detail page");
        on_event(BuildEvent::PageWritten {
            filename: page.filename,
            title: page.link.title.clone(),
        });
        links.push(page.link);
    }

    write_index(&paths.index_file, &links, config)?;
    on_event(BuildEvent::IndexWritten {
        path: paths.index_file.clone(),
    });

    on_event(BuildEvent::Finished {
        count: links.len(),
        output_dir: output_dir.clone(),
    });
    Ok(BuildReport { links, deleted })
}

/// Delete the listed files from `dir`. Returns the names actually removed.
fn remove_legacy_files(dir: &Path, names: &[String]) -> Result<Vec<String>, GenerateError> {
    let mut deleted = Vec::new();
    for name in names {
        let path = dir.join(name);
        if !path.is_file() {
            continue;
        }
        fs::remove_file(&path).map_err(|source| GenerateError::Remove {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "removed legacy file");
        deleted.push(name.clone());
    }
    Ok(deleted)
}

/// Splice the regenerated archive into the existing index page.
fn write_index(
    path: &Path,
    links: &[PublicationLink],
    config: &SiteConfig,
) -> Result<(), GenerateError> {
    let original = fs::read_to_string(path).map_err(|source| GenerateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let updated = index::render_index_document(&original, links, &config.site, &config.index);
    write_file(path, &updated)
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}
