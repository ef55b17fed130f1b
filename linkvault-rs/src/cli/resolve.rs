//! Resolve command implementation.

use crate::cli::args::ResolveArgs;
use crate::cli::output::Output;
use crate::cli::relative_path;
use crate::error::{ExitCode, Result, VaultError};
use crate::parser::split_target;
use crate::types::Heading;
use crate::vault::Vault;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub query: String,
    pub resolved: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<Heading>,
    /// Set when a `#Header` was given but no heading matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_heading: Option<String>,
}

pub fn run(vault: &Vault, args: &ResolveArgs, output: &Output) -> Result<ExitCode> {
    let resolved = vault
        .resolve_link_target(Path::new(""), &args.target)
        .ok_or_else(|| VaultError::NoteNotFound(split_target(&args.target).0.to_string()))?;

    let missing_heading = match (split_target(&args.target).1, &resolved.heading) {
        (Some(header), None) => Some(header.to_string()),
        _ => None,
    };

    output.print(&ResolveResponse {
        query: args.target.clone(),
        resolved: relative_path(vault, &resolved.location),
        heading: resolved.heading,
        missing_heading,
    })?;
    Ok(ExitCode::Success)
}
