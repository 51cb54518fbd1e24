use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use to8chtx::{export_rows, Container, TextStore};

use super::util::{read_all, resolve_config, store_encoding, tmp_path};

pub fn exec(
    input: PathBuf,
    output: PathBuf,
    encoding: Option<String>,
    bits: Option<u32>,
    languages: Option<usize>,
) -> Result<()> {
    let bytes = read_all(&input)?;
    let encoding = store_encoding(encoding);
    let (cfg, _) = resolve_config(&bytes, encoding.as_deref(), bits, languages)?;
    // японский текст в хранилище — для чтения: заполнитель показываем пробелом
    let cfg = cfg.with_replace_placeholder(true);
    let c = Container::parse(&bytes, &cfg)
        .with_context(|| format!("parse {}", input.display()))?;
    let rows = export_rows(&c)?;

    // новая БД собирается рядом и переименовывается целиком
    let tmp = tmp_path(&output)?;
    let _ = fs::remove_file(&tmp); // best‑effort
    {
        let mut store = TextStore::open(&tmp)?;
        store.initialize()?;
        store.insert_entries(&rows)?;
    }
    fs::rename(&tmp, &output)
        .with_context(|| format!("rename {} -> {}", tmp.display(), output.display()))?;

    info!("exported {} rows -> {}", rows.len(), output.display());
    Ok(())
}
