//! container/pool — исходные байты строк, которые кодировка не воспроизводит побайтно.
//!
//! Shift-JIS (CP932) декодируется many-to-one: NEC row 13 (0x8790..0x879C) и
//! NEC-selected IBM extensions (0xED40..0xEEFC) дают те же символы, что и каноничные коды,
//! и обратное кодирование выбирает каноничный вариант. Для таких строк parse запоминает
//! (текст, байты); пока поле не изменено, recalc/serialize берут исходные байты.

use std::fmt;

/// Поле строки таблицы.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolField {
    Name,
    Text(usize),
}

impl fmt::Display for PoolField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolField::Name => write!(f, "name"),
            PoolField::Text(slot) => write!(f, "text[{}]", slot),
        }
    }
}

#[derive(Debug, Clone)]
struct RawString {
    field: PoolField,
    text: String,
    bytes: Vec<u8>,
}

/// Кэш исходных байт одной строки таблицы. Пуст для строк, кодирующихся однозначно.
#[derive(Debug, Clone, Default)]
pub struct PoolBytes {
    entries: Vec<RawString>,
}

impl PoolBytes {
    pub(crate) fn remember(&mut self, field: PoolField, text: &str, bytes: &[u8]) {
        self.entries.retain(|e| e.field != field);
        self.entries.push(RawString {
            field,
            text: text.to_string(),
            bytes: bytes.to_vec(),
        });
    }

    /// Исходные байты поля, если его текущий текст совпадает с прочитанным.
    pub(crate) fn lookup(&self, field: PoolField, current: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.field == field && e.text == current)
            .map(|e| e.bytes.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_requires_unchanged_text() {
        let mut p = PoolBytes::default();
        p.remember(PoolField::Text(1), "≒", &[0x87, 0x90]);
        assert_eq!(p.lookup(PoolField::Text(1), "≒"), Some(&[0x87u8, 0x90][..]));
        assert_eq!(p.lookup(PoolField::Text(1), "≒ "), None);
        assert_eq!(p.lookup(PoolField::Name, "≒"), None);

        p.remember(PoolField::Text(1), "∫", &[0x87, 0x92]);
        assert_eq!(p.lookup(PoolField::Text(1), "≒"), None);
        assert_eq!(PoolField::Text(1).to_string(), "text[1]");
    }
}
