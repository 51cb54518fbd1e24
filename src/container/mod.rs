//! container — модель разобранного TO8CHTX и операции над ней.
//!
//! Раскладка (порядок байт — из CodecConfig, по умолчанию BE):
//!   0x00 [identify 8][file_size u32][lines u32][unknown 4][text_start u32][reserved 8]
//!   0x20 таблица: lines × ([name ptr][lang ptr × N][unknown 4]), ptr = 4|8 байт
//!   text_start: пул NUL-терминированных строк, указатели относительно text_start
//!
//! Модули:
//! - header: 32-байтовый заголовок;
//! - pool: исходные байты неоднозначно кодируемых строк;
//! - parse: bytes -> Container;
//! - recalc: новые указатели и file_size после правок;
//! - serialize: Container -> bytes.
//!
//! Жизненный цикл: parse (или new + push_line) -> правки name/texts -> recalculate -> serialize.

pub mod header;
pub mod parse;
pub mod pool;
pub mod recalc;
pub mod serialize;

pub use header::ChatHeader;
pub use pool::{PoolBytes, PoolField};

use std::borrow::Cow;

use crate::codec::{Endian, PointerWidth, TextEncoding};
use crate::config::CodecConfig;
use crate::consts::{HEADER_SIZE, LINE_UNKNOWN_LEN};
use crate::error::{ChtxError, Result};

/// Одна запись таблицы строк.
#[derive(Debug, Clone, Default)]
pub struct ChatLine {
    pub name_pointer: u64,
    pub text_pointers: Vec<u64>,
    /// Непрозрачное поле записи, переносится как есть.
    pub unknown: [u8; LINE_UNKNOWN_LEN],

    pub name: String,
    pub texts: Vec<String>,

    /// Байты пула для строк, которые кодировка не воспроизводит (заполняет parse).
    pub(crate) raw: PoolBytes,
}

// raw — кэш кодирования, в сравнении не участвует
impl PartialEq for ChatLine {
    fn eq(&self, other: &Self) -> bool {
        self.name_pointer == other.name_pointer
            && self.text_pointers == other.text_pointers
            && self.unknown == other.unknown
            && self.name == other.name
            && self.texts == other.texts
    }
}

impl Eq for ChatLine {}

impl ChatLine {
    /// Новая строка без указателей (их выставит recalculate).
    pub fn new(name: impl Into<String>, texts: Vec<String>) -> Self {
        let n = texts.len();
        Self {
            name_pointer: 0,
            text_pointers: vec![0; n],
            unknown: [0; LINE_UNKNOWN_LEN],
            name: name.into(),
            texts,
            raw: PoolBytes::default(),
        }
    }

    pub fn field(&self, field: PoolField) -> Option<&str> {
        match field {
            PoolField::Name => Some(&self.name),
            PoolField::Text(slot) => self.texts.get(slot).map(String::as_str),
        }
    }

    /// Байты поля для пула: исходные, если поле не менялось после parse, иначе кодирование.
    pub(crate) fn encode_field(
        &self,
        encoding: TextEncoding,
        index: usize,
        field: PoolField,
    ) -> Result<Cow<'_, [u8]>> {
        let text = self.field(field).unwrap_or_default();
        if let Some(bytes) = self.raw.lookup(field, text) {
            return Ok(Cow::Borrowed(bytes));
        }
        encoding
            .encode(text, || format!("line {} {}", index, field))
            .map(Cow::Owned)
    }

    pub(crate) fn encoded_len(
        &self,
        encoding: TextEncoding,
        index: usize,
        field: PoolField,
    ) -> Result<usize> {
        let text = self.field(field).unwrap_or_default();
        match self.raw.lookup(field, text) {
            Some(bytes) => Ok(bytes.len()),
            None => encoding.encoded_len(text, || format!("line {} {}", index, field)),
        }
    }
}

/// Разобранный контейнер. Владелец единственный; между стадиями передаётся по &mut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub header: ChatHeader,
    pub lines: Vec<ChatLine>,

    pub byte_order: Endian,
    pub encoding: TextEncoding,
    pub pointer_width: PointerWidth,
    pub language_count: usize,
}

impl Container {
    /// Пустой контейнер с магией TO8CHTX и text_start сразу за (пустой) таблицей.
    pub fn new(cfg: &CodecConfig) -> Self {
        Self {
            header: ChatHeader::fresh(),
            lines: Vec::new(),
            byte_order: cfg.byte_order,
            encoding: cfg.encoding,
            pointer_width: cfg.pointer_width,
            language_count: cfg.language_count,
        }
    }

    /// Размер записи таблицы: 4 + (language_count + 1) * width.
    #[inline]
    pub fn entry_size(&self) -> usize {
        LINE_UNKNOWN_LEN + (self.language_count + 1) * self.pointer_width.bytes()
    }

    /// Смещение записи index от начала контейнера (для диагностики и ссылок хранилища).
    #[inline]
    pub fn table_offset(&self, index: usize) -> usize {
        HEADER_SIZE + index * self.entry_size()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Добавить строку; line_count и text_start сдвигаются вместе с таблицей.
    pub fn push_line(&mut self, line: ChatLine) -> Result<()> {
        let index = self.lines.len();
        self.check_slots(index, &line)?;
        self.lines.push(line);
        self.header.line_count = self.lines.len() as u32;
        self.header.text_start = self.table_offset(self.lines.len()) as u32;
        Ok(())
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut ChatLine> {
        self.lines.get_mut(index)
    }

    pub(crate) fn check_slots(&self, index: usize, line: &ChatLine) -> Result<()> {
        if line.texts.len() != self.language_count || line.text_pointers.len() != self.language_count {
            return Err(ChtxError::SlotCountMismatch {
                line: index,
                expected: self.language_count,
                found: line.texts.len().min(line.text_pointers.len()),
            });
        }
        Ok(())
    }
}
