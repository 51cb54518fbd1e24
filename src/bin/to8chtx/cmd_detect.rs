use anyhow::{Context, Result};
use std::path::PathBuf;

use to8chtx::{detect_layout_with, CodecConfig};

use super::util::read_all;

pub fn exec(input: PathBuf) -> Result<()> {
    let bytes = read_all(&input)?;
    let order = CodecConfig::from_env().byte_order;
    let layout = detect_layout_with(&bytes, order)
        .with_context(|| format!("detect layout of {} ({})", input.display(), order))?;
    println!("bitness:   {}", layout.pointer_width);
    println!("languages: {}", layout.language_count);
    println!("entry:     {} B", layout.entry_size);
    Ok(())
}
