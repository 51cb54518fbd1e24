//! codec/encoding — кодировки строк пула.
//!
//! Строгий режим в обе стороны: невалидные байты при чтении и непредставимые символы при
//! записи — ошибка, а не замена на '?'. Иначе round-trip перестаёт быть побайтовым.

use encoding_rs::{SHIFT_JIS, UTF_8};
use std::fmt;

use crate::consts::TERMINATOR;
use crate::error::{ChtxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    ShiftJis,
    #[default]
    Utf8,
    Ascii,
}

impl TextEncoding {
    /// Имя кодировки из аргумента CLI/ENV (регистр не важен).
    pub fn from_name(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SHIFTJIS" | "SHIFT_JIS" | "SJIS" => Ok(TextEncoding::ShiftJis),
            "UTF8" | "UTF-8" => Ok(TextEncoding::Utf8),
            "ASCII" => Ok(TextEncoding::Ascii),
            _ => Err(ChtxError::UnknownEncoding(s.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::ShiftJis => "ShiftJIS",
            TextEncoding::Utf8 => "UTF8",
            TextEncoding::Ascii => "ASCII",
        }
    }

    /// Закодировать строку (без терминатора). `what` — описание поля для ошибки.
    pub fn encode(self, s: &str, what: impl FnOnce() -> String) -> Result<Vec<u8>> {
        if s.contains(TERMINATOR as char) {
            return Err(self.encode_err(what(), "string contains NUL"));
        }
        match self {
            TextEncoding::Utf8 => Ok(s.as_bytes().to_vec()),
            TextEncoding::Ascii => {
                if let Some(c) = s.chars().find(|c| !c.is_ascii()) {
                    return Err(self.encode_err(what(), &format!("non-ASCII character {:?}", c)));
                }
                Ok(s.as_bytes().to_vec())
            }
            TextEncoding::ShiftJis => {
                let (bytes, _, had_errors) = SHIFT_JIS.encode(s);
                if had_errors {
                    return Err(self.encode_err(what(), "unmappable character"));
                }
                Ok(bytes.into_owned())
            }
        }
    }

    /// Длина закодированной строки в байтах.
    pub fn encoded_len(self, s: &str, what: impl FnOnce() -> String) -> Result<usize> {
        // UTF-8 совпадает с внутренним представлением String
        if self == TextEncoding::Utf8 && !s.contains(TERMINATOR as char) {
            return Ok(s.len());
        }
        self.encode(s, what).map(|b| b.len())
    }

    /// Декодировать байты строки (без терминатора); offset — для диагностики.
    pub fn decode(self, bytes: &[u8], offset: u64) -> Result<String> {
        let decoded = match self {
            TextEncoding::Utf8 => UTF_8
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            TextEncoding::ShiftJis => SHIFT_JIS
                .decode_without_bom_handling_and_without_replacement(bytes)
                .map(|s| s.into_owned()),
            TextEncoding::Ascii => {
                if bytes.is_ascii() {
                    std::str::from_utf8(bytes).ok().map(str::to_string)
                } else {
                    None
                }
            }
        };
        decoded.ok_or(ChtxError::Decode {
            offset,
            encoding: self.name(),
        })
    }

    /// Даёт ли обратное кодирование text ровно bytes. UTF-8 и ASCII при строгом
    /// декодировании взаимно однозначны; Shift-JIS (CP932) — нет: у NEC/IBM-дублей
    /// кодировщик выбирает каноничный код.
    pub fn reproduces(self, text: &str, bytes: &[u8]) -> bool {
        match self {
            TextEncoding::Utf8 | TextEncoding::Ascii => true,
            TextEncoding::ShiftJis => {
                let (encoded, _, had_errors) = SHIFT_JIS.encode(text);
                !had_errors && encoded.as_ref() == bytes
            }
        }
    }

    fn encode_err(self, what: String, reason: &str) -> ChtxError {
        ChtxError::Encode {
            what,
            encoding: self.name(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
