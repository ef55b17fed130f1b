//! List command implementation.

use crate::cli::args::ListArgs;
use crate::cli::output::Output;
use crate::cli::NoteRef;
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub notes: Vec<NoteRef>,
    pub total: usize,
}

pub fn run(vault: &Vault, args: &ListArgs, output: &Output) -> Result<ExitCode> {
    let mut docs = match &args.name {
        Some(partial) => vault.suggest_notes(partial),
        None => vault.get_all_documents(),
    };

    if let Some(tag) = &args.tag {
        let tagged: BTreeSet<_> = vault.get_documents_for_tag(tag).into_iter().collect();
        docs.retain(|doc| tagged.contains(&doc.location));
    }

    let notes: Vec<NoteRef> = docs.iter().map(|doc| NoteRef::new(vault, doc)).collect();

    if notes.is_empty() {
        output.info("No matching notes");
    }

    output.print(&ListOutput {
        total: notes.len(),
        notes,
    })?;
    Ok(ExitCode::Success)
}
