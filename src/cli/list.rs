//! `webembed list`: print the resolved outputs.
//!
//! Host build systems use `--json` to declare the inputs and outputs of
//! each stage without re-implementing manifest resolution.

use std::path::PathBuf;

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::config::EmbedConfig;
use crate::manifest::ResolvedOutput;
use crate::pipeline::BuildContext;

#[derive(Debug, Serialize)]
struct ListEntry {
    name: String,
    url: String,
    kind: &'static str,
    mime: &'static str,
    origin: &'static str,
    inputs: Vec<PathBuf>,
    artifact: PathBuf,
    header: PathBuf,
}

impl ListEntry {
    fn new(output: &ResolvedOutput, ctx: &BuildContext) -> Self {
        Self {
            name: output.name.clone(),
            url: output.url(),
            kind: output.kind.tag(),
            mime: output.kind.mime(),
            origin: output.origin.as_str(),
            inputs: output.inputs.clone(),
            artifact: output.artifact(&ctx.data_dir),
            header: ctx.generated_dir.join(ctx.emit.header_name(&output.name)),
        }
    }
}

pub fn list(config: &EmbedConfig, json: bool) -> Result<()> {
    let ctx = BuildContext::from_config(config);
    let entries: Vec<ListEntry> = ctx
        .resolve()?
        .iter()
        .map(|output| ListEntry::new(output, &ctx))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        println!(
            "{} {} {}",
            entry.name.bold(),
            format_args!("[{}]", entry.kind).cyan(),
            entry.origin.dimmed()
        );
        for input in &entry.inputs {
            println!("  {}", input.display());
        }
    }
    Ok(())
}
