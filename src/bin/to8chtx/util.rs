use anyhow::{anyhow, Context, Result};
use log::info;
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use to8chtx::{detect_layout_with, CodecConfig, Layout, PointerWidth, TextEncoding};

pub fn read_all(p: &Path) -> Result<Vec<u8>> {
    let mut f = OpenOptions::new()
        .read(true)
        .open(p)
        .with_context(|| format!("open {}", p.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)
        .with_context(|| format!("read {}", p.display()))?;
    Ok(buf)
}

pub fn read_text(p: &Path) -> Result<String> {
    let bytes = read_all(p)?;
    let s = String::from_utf8(bytes).with_context(|| format!("{} is not UTF-8", p.display()))?;
    // BOM от редакторов под Windows
    Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s))
}

/// `<path>.tmp` рядом с целью; родительский каталог создаётся.
pub fn tmp_path(path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir {}", parent.display()))?;
        }
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("output path {} has no file name", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

/// Атомарная запись: tmp + fsync + rename. До rename цель не трогается.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = tmp_path(path)?;
    let _ = fs::remove_file(&tmp); // best‑effort

    {
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .with_context(|| format!("open tmp {}", tmp.display()))?;
        f.write_all(bytes)?;
        f.sync_all()?;
    }

    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

/// Кодировка для обмена с хранилищем: флаг, иначе CHTX_ENCODING, иначе ShiftJIS.
pub fn store_encoding(flag: Option<String>) -> Option<String> {
    match flag {
        Some(name) => Some(name),
        None if std::env::var_os("CHTX_ENCODING").is_some() => None,
        None => Some(TextEncoding::ShiftJis.name().to_string()),
    }
}

/// Конфиг из ENV + флагов. Если ни --bits, ни --languages не заданы, раскладка определяется
/// по заголовку и возвращается вторым значением.
pub fn resolve_config(
    bytes: &[u8],
    encoding: Option<&str>,
    bits: Option<u32>,
    languages: Option<usize>,
) -> Result<(CodecConfig, Option<Layout>)> {
    let mut cfg = CodecConfig::from_env();
    if let Some(name) = encoding {
        cfg = cfg.with_encoding(TextEncoding::from_name(name)?);
    }

    if bits.is_none() && languages.is_none() {
        let layout = detect_layout_with(bytes, cfg.byte_order)?;
        info!(
            "detected layout: {} pointers, {} languages (entry {} B)",
            layout.pointer_width, layout.language_count, layout.entry_size
        );
        return Ok((cfg.with_layout(layout).build(), Some(layout)));
    }

    if let Some(b) = bits {
        let w = PointerWidth::from_bits(b).ok_or_else(|| anyhow!("--bits must be 32 or 64, got {}", b))?;
        cfg = cfg.with_pointer_width(w);
    }
    if let Some(n) = languages {
        if n == 0 {
            return Err(anyhow!("--languages must be a positive integer"));
        }
        cfg = cfg.with_language_count(n);
    }
    Ok((cfg.build(), None))
}
