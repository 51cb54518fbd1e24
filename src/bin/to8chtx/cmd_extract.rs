use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use to8chtx::{extract_markup, Container};

use super::util::{read_all, resolve_config, write_atomic};

pub fn exec(input: PathBuf, output: PathBuf, encoding: Option<String>, replace_at: bool) -> Result<()> {
    let bytes = read_all(&input)?;
    let (cfg, detected) = resolve_config(&bytes, encoding.as_deref(), None, None)?;
    let replace = replace_at || cfg.replace_placeholder;
    let cfg = cfg.with_replace_placeholder(replace);
    if cfg.replace_placeholder {
        warn!("'@' replaced with spaces: {} is for reading, packing it back changes the text", output.display());
    }

    let c = Container::parse(&bytes, &cfg)
        .with_context(|| format!("parse {}", input.display()))?;
    let text = extract_markup(&c, detected.as_ref());
    write_atomic(&output, text.as_bytes())?;

    info!("extracted {} lines -> {}", c.line_count(), output.display());
    Ok(())
}
