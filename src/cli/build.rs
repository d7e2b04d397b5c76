//! `webembed build`: the whole pipeline.

use anyhow::Result;

use crate::config::EmbedConfig;
use crate::log;
use crate::pipeline::{BuildContext, run_build};
use crate::utils::plural_count;

/// Bundle, embed and write the routing table.
pub fn build(config: &EmbedConfig, clean: bool) -> Result<()> {
    let ctx = BuildContext::from_config(config);
    let summary = run_build(&ctx, clean)?;

    let mut message = format!(
        "{} embedded, {} bundled",
        plural_count(summary.outputs, "output"),
        summary.bundled
    );
    if clean {
        message.push_str(&format!(", {} pruned", plural_count(summary.pruned, "header")));
    }
    log!("done"; "{}", message);
    Ok(())
}
