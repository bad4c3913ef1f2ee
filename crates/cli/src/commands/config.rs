//! Print the effective configuration.

use anyhow::Result;
use openpedal_config::ConfigFormat;

use super::ConfigArgs;
use crate::settings;

/// Print the configuration `run` would use, as YAML or (with `--json`) JSON.
pub fn execute(args: &ConfigArgs, json: bool) -> Result<()> {
    let config = settings::resolve(&args.source, Some(&args.shaping))?;
    let format = if json { ConfigFormat::Json } else { ConfigFormat::Yaml };
    let text = config.render(format)?;
    print!("{text}");
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}
