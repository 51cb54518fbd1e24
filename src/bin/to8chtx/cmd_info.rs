use anyhow::{Context, Result};
use std::path::PathBuf;

use to8chtx::Container;

use super::util::{read_all, resolve_config};

pub fn exec(input: PathBuf, encoding: Option<String>, json: bool) -> Result<()> {
    let bytes = read_all(&input)?;
    let (cfg, _) = resolve_config(&bytes, encoding.as_deref(), None, None)?;
    let c = Container::parse(&bytes, &cfg)
        .with_context(|| format!("parse {}", input.display()))?;

    let h = &c.header;
    let pool = bytes.len() as u64 - (h.text_start as u64).min(bytes.len() as u64);

    if json {
        let v = serde_json::json!({
            "file": input.display().to_string(),
            "actual_size": bytes.len(),
            "file_size": h.file_size,
            "lines": h.line_count,
            "text_start": h.text_start,
            "bitness": c.pointer_width.to_string(),
            "languages": c.language_count,
            "entry_size": c.entry_size(),
            "encoding": c.encoding.name(),
            "pool_bytes": pool,
        });
        println!("{}", v);
        return Ok(());
    }

    println!("file:       {}", input.display());
    println!("size:       {} B (header says {})", bytes.len(), h.file_size);
    println!("lines:      {}", h.line_count);
    println!("text_start: {:#x}", h.text_start);
    println!("layout:     {} x{} languages ({} B/entry)", c.pointer_width, c.language_count, c.entry_size());
    println!("encoding:   {}", c.encoding);
    println!("pool:       {} B", pool);
    Ok(())
}
