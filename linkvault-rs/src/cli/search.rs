//! Search command implementation.

use crate::cli::args::SearchArgs;
use crate::cli::output::Output;
use crate::cli::{NoteRef, relative_path};
use crate::error::{ExitCode, Result};
use crate::search::CancellationToken;
use crate::vault::Vault;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub results: Vec<NoteRef>,
    pub total: usize,
}

pub fn run(vault: &Vault, args: &SearchArgs, output: &Output) -> Result<ExitCode> {
    let results: Vec<NoteRef> = vault
        .search(&args.query, &CancellationToken::none())
        .into_iter()
        .map(|hit| NoteRef {
            path: relative_path(vault, &hit.location),
            name: hit.display_name,
        })
        .collect();

    output.print(&SearchOutput {
        query: args.query.clone(),
        total: results.len(),
        results,
    })?;
    Ok(ExitCode::Success)
}
