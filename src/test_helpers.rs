//! Shared test utilities for the pubpages test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let paths = fixture_paths(tmp.path());
//! let report = build(&paths, &SiteConfig::default(), |_| {}).unwrap();
//! assert_eq!(link_filenames(&report.links)[0], "2023-01-a-study-of-gf2-codes.html");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::PathsConfig;
use crate::types::PublicationLink;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Default config paths resolved against a fixture root.
pub fn fixture_paths(root: &Path) -> PathsConfig {
    PathsConfig::default().resolve(root)
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Detail page filenames in build order.
pub fn link_filenames(links: &[PublicationLink]) -> Vec<&str> {
    links.iter().map(|l| l.filename.as_str()).collect()
}
