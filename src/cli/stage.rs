//! Single-stage commands: `bundle`, `embed`, `table`.

use anyhow::Result;

use crate::config::EmbedConfig;
use crate::pipeline::{BuildContext, run_bundle, run_embed, run_table};

pub fn bundle(config: &EmbedConfig, names: &[String]) -> Result<()> {
    run_bundle(&BuildContext::from_config(config), names).map(drop)
}

pub fn embed(config: &EmbedConfig, names: &[String]) -> Result<()> {
    run_embed(&BuildContext::from_config(config), names).map(drop)
}

pub fn table(config: &EmbedConfig) -> Result<()> {
    run_table(&BuildContext::from_config(config)).map(drop)
}
