//! Tag-related CLI commands.

use crate::cli::args::TagsArgs;
use crate::cli::output::Output;
use crate::cli::relative_path;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

/// Output for the vault-wide tag summary.
#[derive(Debug, Serialize)]
pub struct VaultTagsOutput {
    pub tags: Vec<VaultTagOutput>,
}

#[derive(Debug, Serialize)]
pub struct VaultTagOutput {
    pub tag: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<PathBuf>>,
}

/// Output for a single tag.
#[derive(Debug, Serialize)]
pub struct TagNotesOutput {
    pub tag: String,
    pub notes: Vec<PathBuf>,
}

pub fn run(vault: &Vault, args: &TagsArgs, output: &Output) -> Result<ExitCode> {
    match &args.tag {
        Some(tag) => {
            let notes = vault
                .get_documents_for_tag(tag)
                .iter()
                .map(|path| relative_path(vault, path))
                .collect();
            output.print(&TagNotesOutput {
                tag: tag.trim_start_matches('#').to_string(),
                notes,
            })?;
        }
        None => {
            let tags = vault
                .get_all_tags()
                .into_iter()
                .map(|info| VaultTagOutput {
                    notes: (!args.counts_only).then(|| {
                        info.notes
                            .iter()
                            .map(|path| relative_path(vault, path))
                            .collect()
                    }),
                    tag: info.name,
                    count: info.count,
                })
                .collect();
            output.print(&VaultTagsOutput { tags })?;
        }
    }
    Ok(ExitCode::Success)
}
