use anyhow::{bail, Context, Result};
use log::info;
use std::path::PathBuf;

use to8chtx::{apply_pointer_refs, Container, TextStore};

use super::util::{read_all, resolve_config, store_encoding, write_atomic};

pub fn exec(
    input: PathBuf,
    db: PathBuf,
    output: PathBuf,
    encoding: Option<String>,
    bits: Option<u32>,
    languages: Option<usize>,
) -> Result<()> {
    let bytes = read_all(&input)?;
    let encoding = store_encoding(encoding);
    let (cfg, _) = resolve_config(&bytes, encoding.as_deref(), bits, languages)?;
    let mut c = Container::parse(&bytes, &cfg)
        .with_context(|| format!("parse {}", input.display()))?;

    if !db.is_file() {
        bail!("store {} does not exist", db.display());
    }
    let rows = TextStore::open(&db)
        .and_then(|store| store.rows())
        .with_context(|| format!("read store {}", db.display()))?;

    let stats = apply_pointer_refs(&mut c, &rows)?;
    c.recalculate()?;
    let out = c.serialize()?;
    write_atomic(&output, &out)?;

    info!(
        "merged {} names, {} texts ({} rows skipped) -> {}",
        stats.names,
        stats.texts,
        stats.skipped,
        output.display()
    );
    Ok(())
}
