//! Index info command.

use crate::cli::output::Output;
use crate::error::{ExitCode, Result};
use crate::normalize::SpaceReplacement;
use crate::scanner::ScanIssue;
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct InfoOutput {
    pub vault_path: PathBuf,
    pub case_sensitive: bool,
    pub space_replacement: SpaceReplacement,
    pub note_count: usize,
    pub tag_count: usize,
    pub link_count: usize,
    pub broken_link_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_rebuild: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scan_issues: Vec<ScanIssue>,
}

pub fn run(vault: &Vault, output: &Output) -> Result<ExitCode> {
    let stats = vault.stats();
    let settings = vault.settings();

    output.print(&InfoOutput {
        vault_path: stats.root.unwrap_or_default(),
        case_sensitive: settings.case_sensitive,
        space_replacement: settings.space_replacement,
        note_count: stats.documents,
        tag_count: stats.tags,
        link_count: stats.links,
        broken_link_count: vault.broken_links().len(),
        last_rebuild: stats.last_rebuild.map(|t| t.to_rfc3339()),
        scan_issues: stats.scan_issues,
    })?;
    Ok(ExitCode::Success)
}
