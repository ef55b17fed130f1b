//! Headings command implementation.

use crate::cli::args::NoteArgs;
use crate::cli::output::Output;
use crate::cli::{NoteRef, locate_note};
use crate::error::{ExitCode, Result};
use crate::types::Heading;
use crate::vault::Vault;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HeadingsOutput {
    pub note: NoteRef,
    pub headings: Vec<Heading>,
}

pub fn run(vault: &Vault, args: &NoteArgs, output: &Output) -> Result<ExitCode> {
    let doc = locate_note(vault, &args.note)?;

    output.print(&HeadingsOutput {
        note: NoteRef::new(vault, &doc),
        headings: doc.headings.clone(),
    })?;
    Ok(ExitCode::Success)
}
