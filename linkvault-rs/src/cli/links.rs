//! Link-related CLI commands: backlinks, graph and broken links.

use crate::cli::args::{BrokenLinksArgs, NoteArgs};
use crate::cli::output::Output;
use crate::cli::{NoteRef, locate_note, relative_path};
use crate::error::{ExitCode, Result};
use crate::vault::Vault;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
pub struct BacklinksOutput {
    pub note: NoteRef,
    pub backlinks: Vec<NoteRef>,
}

#[derive(Debug, Serialize)]
pub struct GraphOutput {
    pub nodes: Vec<NoteRef>,
    pub edges: Vec<EdgeOutput>,
}

#[derive(Debug, Serialize)]
pub struct EdgeOutput {
    pub from: PathBuf,
    pub to: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct BrokenLinksOutput {
    pub broken: Vec<BrokenLinkOutput>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BrokenLinkOutput {
    pub source: PathBuf,
    pub target: String,
    pub line: usize,
}

pub fn backlinks(vault: &Vault, args: &NoteArgs, output: &Output) -> Result<ExitCode> {
    let doc = locate_note(vault, &args.note)?;
    let backlinks = vault
        .get_backlinks(&doc.location)
        .iter()
        .map(|source| NoteRef::new(vault, source))
        .collect();

    output.print(&BacklinksOutput {
        note: NoteRef::new(vault, &doc),
        backlinks,
    })?;
    Ok(ExitCode::Success)
}

pub fn graph(vault: &Vault, output: &Output) -> Result<ExitCode> {
    let graph = vault.link_graph();

    output.print(&GraphOutput {
        nodes: graph
            .nodes
            .iter()
            .map(|node| NoteRef {
                name: node.display_name.clone(),
                path: relative_path(vault, &node.location),
            })
            .collect(),
        edges: graph
            .edges
            .iter()
            .map(|edge| EdgeOutput {
                from: relative_path(vault, &edge.from),
                to: relative_path(vault, &edge.to),
            })
            .collect(),
    })?;
    Ok(ExitCode::Success)
}

pub fn broken_links(vault: &Vault, args: &BrokenLinksArgs, output: &Output) -> Result<ExitCode> {
    let broken: Vec<BrokenLinkOutput> = vault
        .broken_links()
        .into_iter()
        .map(|link| BrokenLinkOutput {
            source: relative_path(vault, &link.source),
            target: link.target,
            line: link.line,
        })
        .collect();

    let found = !broken.is_empty();
    output.print(&BrokenLinksOutput {
        total: broken.len(),
        broken,
    })?;

    if args.check && found {
        Ok(ExitCode::BrokenLinksFound)
    } else {
        Ok(ExitCode::Success)
    }
}
