use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use to8chtx::{apply_markup, Container};

use super::util::{read_all, read_text, resolve_config, write_atomic};

pub fn exec(input: PathBuf, text: PathBuf, output: PathBuf, encoding: Option<String>) -> Result<()> {
    let bytes = read_all(&input)?;
    let (cfg, _) = resolve_config(&bytes, encoding.as_deref(), None, None)?;
    // pack всегда работает с сырыми строками
    let cfg = cfg.with_replace_placeholder(false);

    let mut c = Container::parse(&bytes, &cfg)
        .with_context(|| format!("parse {}", input.display()))?;
    let markup = read_text(&text)?;
    apply_markup(&mut c, &markup).with_context(|| format!("apply {}", text.display()))?;

    c.recalculate()?;
    let out = c.serialize()?;
    write_atomic(&output, &out)?;

    info!(
        "packed {} lines: {} B -> {} B ({})",
        c.line_count(),
        bytes.len(),
        out.len(),
        output.display()
    );
    Ok(())
}
