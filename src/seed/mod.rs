//! Seed-file parsing
//!
//! Seed files are SQL scripts with `INSERT` tuples whose `preconditions`
//! and `steps` columns hold JSON inside string literals. Scenarios are
//! recovered with the heuristics in [`scanner`].

mod scanner;
pub mod sql;

pub use scanner::{ScanResult, SeedScanner};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::catalog::Scenario;
use crate::common::{Error, Result};

/// How scenario boundaries are found in a seed file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SeedLayout {
    /// Comment-prefix when the file has `-- CODE-NN` lines, otherwise role-tuple
    #[default]
    Auto,
    /// Each tuple opens with `('<role>', '<name>', ...`
    RoleTuple,
    /// Each scenario is introduced by a `-- CODE-NN: name` comment line
    CommentPrefix,
}

impl fmt::Display for SeedLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedLayout::Auto => write!(f, "auto"),
            SeedLayout::RoleTuple => write!(f, "role-tuple"),
            SeedLayout::CommentPrefix => write!(f, "comment-prefix"),
        }
    }
}

/// Per-file parse summary
#[derive(Debug, Clone, Serialize)]
pub struct SeedFileReport {
    pub path: PathBuf,
    pub layout: SeedLayout,
    pub extracted: usize,
    pub skipped: usize,
}

/// Scenarios gathered from a list of seed files
#[derive(Debug, Default)]
pub struct SeedSet {
    /// Scenarios in file order, then extraction order
    pub scenarios: Vec<Scenario>,
    pub files: Vec<SeedFileReport>,
    /// Files that didn't exist and were skipped
    pub missing: Vec<PathBuf>,
}

impl SeedSet {
    /// Blocks dropped across all files
    pub fn skipped(&self) -> usize {
        self.files.iter().map(|f| f.skipped).sum()
    }
}

/// Parse one seed file's text
pub fn parse_seed(scanner: &SeedScanner, text: &str, layout: SeedLayout) -> (SeedLayout, ScanResult) {
    let resolved = scanner.resolve_layout(text, layout);
    (resolved, scanner.scan(text, resolved))
}

/// Read and parse every seed file, skipping the ones that don't exist
pub fn load_seed_files(scanner: &SeedScanner, paths: &[PathBuf], layout: SeedLayout) -> Result<SeedSet> {
    let mut set = SeedSet::default();

    for path in paths {
        let Some(text) = read_seed(path)? else {
            tracing::warn!(path = %path.display(), "seed file not found, skipping");
            set.missing.push(path.clone());
            continue;
        };

        let (resolved, result) = parse_seed(scanner, &text, layout);
        tracing::debug!(
            path = %path.display(),
            layout = %resolved,
            extracted = result.scenarios.len(),
            skipped = result.skipped,
            "parsed seed file"
        );

        set.files.push(SeedFileReport {
            path: path.clone(),
            layout: resolved,
            extracted: result.scenarios.len(),
            skipped: result.skipped,
        });
        set.scenarios.extend(result.scenarios);
    }

    Ok(set)
}

/// `Ok(None)` when the file doesn't exist
fn read_seed(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::file_read(path, e)),
    }
}
