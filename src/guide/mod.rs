//! Tester guide generation
//!
//! Reads the live scenario catalogue over the REST API, summarises it per
//! role and category, and writes a styled `.docx` manual.

pub mod client;
pub mod content;
pub mod document;
pub mod docx;
pub mod summary;

pub use client::{Credentials, ScenarioClient, ScenarioRow};
pub use content::build_guide;
pub use document::Document;
pub use summary::{group_by_role, CatalogSummary, RoleSummary};

use std::path::{Path, PathBuf};

use crate::common::env::load_env_file;
use crate::common::Result;

/// Resolved inputs for one guide run
#[derive(Debug, Clone)]
pub struct GuideOptions {
    pub env_file: PathBuf,
    pub output: PathBuf,
    pub page_size: usize,
    pub dry_run: bool,
}

/// Load credentials, fetch every active manual scenario and group them
pub async fn fetch_summary(options: &GuideOptions) -> Result<CatalogSummary> {
    let vars = load_env_file(&options.env_file)?;
    let credentials = Credentials::from_env(&vars, &options.env_file)?;
    tracing::debug!(url = %credentials.url, "using Supabase project");

    let client = ScenarioClient::new(credentials, options.page_size);
    let rows = client.fetch_active_manual().await?;
    Ok(group_by_role(rows))
}

/// Build the document and write it, reporting each section title
pub fn write_guide(summary: &CatalogSummary, output: &Path, on_section: impl FnMut(&str)) -> Result<()> {
    let doc = build_guide(summary, on_section);
    docx::write_docx(&doc, output)
}
