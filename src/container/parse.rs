//! container/parse — bytes -> Container при известной (явной или определённой) раскладке.
//!
//! Таблица читается последовательно; каждая строка берётся по абсолютному смещению
//! base + pointer + text_start, курсор таблицы при этом не двигается.
//! Любая ошибка прерывает разбор целиком: записи связаны общим text_start.
//! Строки, которые кодировка не воспроизводит побайтно, сохраняют исходные байты (pool).

use log::debug;

use super::{ChatHeader, ChatLine, Container, PoolBytes, PoolField};
use crate::codec::{ByteReader, TextEncoding};
use crate::config::CodecConfig;
use crate::consts::PLACEHOLDER;
use crate::error::{ChtxError, Result};

impl Container {
    /// Разобрать контейнер, начинающийся с нулевого смещения.
    pub fn parse(bytes: &[u8], cfg: &CodecConfig) -> Result<Self> {
        Self::parse_at(bytes, 0, cfg)
    }

    /// Разобрать контейнер, вложенный в bytes со смещения base.
    pub fn parse_at(bytes: &[u8], base: usize, cfg: &CodecConfig) -> Result<Self> {
        let mut r = ByteReader::new(bytes, cfg.byte_order);
        r.seek(base)?;

        let header = ChatHeader::read(&mut r)?;
        let line_count = header.line_count as usize;
        let pool_base = base as u64 + header.text_start as u64;

        let mut c = Container {
            header,
            lines: Vec::new(),
            byte_order: cfg.byte_order,
            encoding: cfg.encoding,
            pointer_width: cfg.pointer_width,
            language_count: cfg.language_count,
        };
        // line_count не доверяем для аллокации: ограничиваем тем, что реально влезает в буфер
        let fits = bytes.len().saturating_sub(r.position()) / c.entry_size().max(1);
        c.lines.reserve(line_count.min(fits));

        for i in 0..line_count {
            let name_pointer = r.read_ptr(cfg.pointer_width)?;
            let mut text_pointers = Vec::with_capacity(cfg.language_count);
            for _ in 0..cfg.language_count {
                text_pointers.push(r.read_ptr(cfg.pointer_width)?);
            }
            let unknown = r.read_array()?;

            let mut raw = PoolBytes::default();
            let name = read_pool_string(
                &r,
                cfg.encoding,
                pool_base,
                name_pointer,
                i,
                PoolField::Name,
                &mut raw,
            )?;
            let mut texts = Vec::with_capacity(cfg.language_count);
            for (slot, &ptr) in text_pointers.iter().enumerate() {
                let field = PoolField::Text(slot);
                let text = read_pool_string(&r, cfg.encoding, pool_base, ptr, i, field, &mut raw)?;
                texts.push(if cfg.replace_placeholder {
                    text.replace(PLACEHOLDER, " ")
                } else {
                    text
                });
            }

            c.lines.push(ChatLine {
                name_pointer,
                text_pointers,
                unknown,
                name,
                texts,
                raw,
            });
        }

        debug!(
            "parsed TO8CHTX: {} lines, text_start={:#x}, file_size={}, {} x{} ({})",
            c.lines.len(),
            c.header.text_start,
            c.header.file_size,
            c.pointer_width,
            c.language_count,
            c.encoding
        );
        Ok(c)
    }
}

fn read_pool_string(
    r: &ByteReader<'_>,
    encoding: TextEncoding,
    pool_base: u64,
    pointer: u64,
    line: usize,
    field: PoolField,
    raw: &mut PoolBytes,
) -> Result<String> {
    let out_of_range = |offset: u64| ChtxError::PointerOutOfRange {
        line,
        field: field.to_string(),
        offset,
    };
    let offset = pool_base
        .checked_add(pointer)
        .ok_or_else(|| out_of_range(u64::MAX))?;
    let bytes = r.cstr_at(offset).ok_or_else(|| out_of_range(offset))?;
    let text = encoding.decode(bytes, offset)?;
    if !encoding.reproduces(&text, bytes) {
        debug!("line {} {}: keeping original pool bytes at {:#x}", line, field, offset);
        raw.remember(field, &text, bytes);
    }
    Ok(text)
}
