//! layout — определение ширины указателей и числа языков по геометрии заголовка.
//!
//! Из заголовка известны только line_count и text_start; неизвестных два:
//!   entry_size = 4 + (language_count + 1) * width
//!   text_start - 32 = line_count * entry_size
//! Кандидаты ширины перебираются от широкого к узкому (B64, затем B32), первый
//! валидный выигрывает. Узкая ширина чаще даёт ложное совпадение на данных широкой раскладки.
//!
//! Заголовок читается в порядке байт контейнера; detect_layout() — big-endian (формат игры).

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use log::debug;

use crate::codec::{Endian, PointerWidth};
use crate::consts::{
    HEADER_SIZE, IDENTIFY_LEN, LINE_UNKNOWN_LEN, MAGIC, OFF_FILE_SIZE, OFF_IDENTIFY,
    OFF_LINE_COUNT, OFF_TEXT_START,
};
use crate::error::{ChtxError, Result};

/// Результат автоопределения раскладки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub pointer_width: PointerWidth,
    pub language_count: usize,
    pub entry_size: usize,
}

/// Поля заголовка, нужные детектору.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderGeometry {
    pub identify: [u8; IDENTIFY_LEN],
    pub file_size: u32,
    pub line_count: u32,
    pub text_start: u32,
}

impl HeaderGeometry {
    /// Прочитать геометрию из первых 32 байт в порядке order.
    pub fn read(bytes: &[u8], order: Endian) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(ChtxError::TooSmall {
                len: bytes.len(),
                need: HEADER_SIZE,
            });
        }
        let mut identify = [0u8; IDENTIFY_LEN];
        identify.copy_from_slice(&bytes[OFF_IDENTIFY..OFF_IDENTIFY + IDENTIFY_LEN]);
        let u32_at = |off: usize| match order {
            Endian::Big => BigEndian::read_u32(&bytes[off..off + 4]),
            Endian::Little => LittleEndian::read_u32(&bytes[off..off + 4]),
        };
        Ok(Self {
            identify,
            file_size: u32_at(OFF_FILE_SIZE),
            line_count: u32_at(OFF_LINE_COUNT),
            text_start: u32_at(OFF_TEXT_START),
        })
    }

    /// Магия: "TO8CHTX", дальше внутри 8-байтового поля только NUL.
    pub fn has_magic(&self) -> bool {
        let tag = &self.identify[..MAGIC.len()];
        tag == MAGIC && self.identify[MAGIC.len()..].iter().all(|&b| b == 0)
    }
}

/// Число языков для данной ширины, если entry_size ей соответствует.
pub fn decode_entry_size(entry_size: u64, width: PointerWidth) -> Option<usize> {
    let w = width.bytes() as u64;
    let rem = entry_size.checked_sub(LINE_UNKNOWN_LEN as u64)?;
    if rem == 0 || rem % w != 0 {
        return None;
    }
    let languages = (rem / w).checked_sub(1)?;
    if languages == 0 {
        return None;
    }
    usize::try_from(languages).ok()
}

/// Определить раскладку по уже прочитанной геометрии.
/// actual_len — реальная длина файла, если известна (проверка file_size).
pub fn detect_from_geometry(g: &HeaderGeometry, actual_len: Option<u64>) -> Result<Layout> {
    if !g.has_magic() {
        return Err(ChtxError::BadMagic { found: g.identify });
    }
    if g.line_count == 0 {
        return Err(ChtxError::ZeroLines);
    }
    if (g.text_start as usize) < HEADER_SIZE {
        return Err(ChtxError::TextStartTooSmall {
            text_start: g.text_start,
            min: HEADER_SIZE as u32,
        });
    }

    let table_size = (g.text_start as u64) - HEADER_SIZE as u64;
    if table_size == 0 || table_size % g.line_count as u64 != 0 {
        return Err(ChtxError::TableNotDivisible {
            table_size,
            line_count: g.line_count,
        });
    }
    let entry_size = table_size / g.line_count as u64;

    let (pointer_width, language_count) = PointerWidth::WIDEST_FIRST
        .iter()
        .find_map(|&w| decode_entry_size(entry_size, w).map(|n| (w, n)))
        .ok_or(ChtxError::NoLayoutCandidate { entry_size })?;

    if let Some(actual) = actual_len {
        // 0 в заголовке — «не указан»
        if g.file_size > 0 && g.file_size as u64 > actual {
            return Err(ChtxError::FileSizeExceedsActual {
                declared: g.file_size,
                actual,
            });
        }
    }

    debug!(
        "layout: lines={} text_start={:#x} entry_size={} -> {} x{} languages",
        g.line_count, g.text_start, entry_size, pointer_width, language_count
    );

    Ok(Layout {
        pointer_width,
        language_count,
        entry_size: entry_size as usize,
    })
}

/// Определить раскладку по байтам всего файла (big-endian заголовок).
pub fn detect_layout(bytes: &[u8]) -> Result<Layout> {
    detect_layout_with(bytes, Endian::Big)
}

/// То же для контейнера с заданным порядком байт.
pub fn detect_layout_with(bytes: &[u8], order: Endian) -> Result<Layout> {
    let g = HeaderGeometry::read(bytes, order)?;
    detect_from_geometry(&g, Some(bytes.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(line_count: u32, text_start: u32) -> HeaderGeometry {
        let mut identify = [0u8; 8];
        identify[..7].copy_from_slice(MAGIC);
        HeaderGeometry {
            identify,
            file_size: 0,
            line_count,
            text_start,
        }
    }

    #[test]
    fn decode_entry_size_cases() {
        assert_eq!(decode_entry_size(16, PointerWidth::B32), Some(2));
        assert_eq!(decode_entry_size(16, PointerWidth::B64), None); // 12 % 8 != 0
        assert_eq!(decode_entry_size(20, PointerWidth::B64), Some(1));
        assert_eq!(decode_entry_size(12, PointerWidth::B64), None); // 0 languages
        assert_eq!(decode_entry_size(8, PointerWidth::B32), None); // 0 languages
        assert_eq!(decode_entry_size(4, PointerWidth::B32), None);
        assert_eq!(decode_entry_size(2, PointerWidth::B32), None);
    }

    #[test]
    fn tie_break_prefers_wide() {
        // 36: B64 -> 32/8-1 = 3, B32 -> 32/4-1 = 7
        let l = detect_from_geometry(&geometry(2, 32 + 72), None).unwrap();
        assert_eq!(l.pointer_width, PointerWidth::B64);
        assert_eq!(l.language_count, 3);
        assert_eq!(l.entry_size, 36);
    }

    #[test]
    fn magic_must_be_nul_padded() {
        let mut g = geometry(1, 48);
        assert!(g.has_magic());
        g.identify[7] = b'X';
        assert!(matches!(
            detect_from_geometry(&g, None),
            Err(ChtxError::BadMagic { .. })
        ));
    }

    #[test]
    fn file_size_zero_means_unknown() {
        let g = geometry(1, 48);
        assert!(detect_from_geometry(&g, Some(10)).is_ok());
        let g = HeaderGeometry { file_size: 100, ..g };
        assert_eq!(
            detect_from_geometry(&g, Some(99)),
            Err(ChtxError::FileSizeExceedsActual {
                declared: 100,
                actual: 99
            })
        );
        assert!(detect_from_geometry(&g, Some(100)).is_ok());
    }
}
