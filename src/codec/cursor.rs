//! codec/cursor — чтение/запись целых фиксированной ширины с выбираемым порядком байт.
//!
//! Что здесь:
//! - Endian: порядок байт контейнера (игра использует big-endian);
//! - PointerWidth: ширина указателей таблицы (B32/B64);
//! - ByteReader: курсор по срезу; строки читаются по абсолютному смещению без сдвига курсора;
//! - ByteWriter: накопитель байт для сериализации.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use std::fmt;

use crate::consts::TERMINATOR;
use crate::error::{ChtxError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

impl Endian {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "be" | "big" | "bigendian" => Some(Endian::Big),
            "le" | "little" | "littleendian" => Some(Endian::Little),
            _ => None,
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endian::Big => write!(f, "BigEndian"),
            Endian::Little => write!(f, "LittleEndian"),
        }
    }
}

/// Ширина указателя в таблице строк.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerWidth {
    #[default]
    B32,
    B64,
}

impl PointerWidth {
    /// Порядок перебора при автоопределении: сначала широкий.
    pub const WIDEST_FIRST: [PointerWidth; 2] = [PointerWidth::B64, PointerWidth::B32];

    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            PointerWidth::B32 => 4,
            PointerWidth::B64 => 8,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            32 => Some(PointerWidth::B32),
            64 => Some(PointerWidth::B64),
            _ => None,
        }
    }

    #[inline]
    pub fn max_value(self) -> u64 {
        match self {
            PointerWidth::B32 => u32::MAX as u64,
            PointerWidth::B64 => u64::MAX,
        }
    }
}

impl fmt::Display for PointerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerWidth::B32 => write!(f, "B32"),
            PointerWidth::B64 => write!(f, "B64"),
        }
    }
}

/// Курсор чтения по срезу.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
    endian: Endian,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8], endian: Endian) -> Self {
        Self { buf, pos: 0, endian }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf.len() {
            return Err(ChtxError::Truncated {
                offset: pos as u64,
                needed: 0,
                available: self.buf.len() as u64,
            });
        }
        self.pos = pos;
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).filter(|&e| e <= self.buf.len());
        match end {
            Some(end) => {
                let out = &self.buf[self.pos..end];
                self.pos = end;
                Ok(out)
            }
            None => Err(ChtxError::Truncated {
                offset: self.pos as u64,
                needed: n,
                available: self.buf.len().saturating_sub(self.pos) as u64,
            }),
        }
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.read_bytes(4)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_u32(b),
            Endian::Little => LittleEndian::read_u32(b),
        })
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let b = self.read_bytes(8)?;
        Ok(match self.endian {
            Endian::Big => BigEndian::read_u64(b),
            Endian::Little => LittleEndian::read_u64(b),
        })
    }

    pub fn read_ptr(&mut self, width: PointerWidth) -> Result<u64> {
        match width {
            PointerWidth::B32 => self.read_u32().map(u64::from),
            PointerWidth::B64 => self.read_u64(),
        }
    }

    /// Байты NUL-терминированной строки по абсолютному смещению (без терминатора).
    /// Позиция курсора не меняется. None — смещение за концом данных или нет терминатора.
    pub fn cstr_at(&self, offset: u64) -> Option<&'a [u8]> {
        let start = usize::try_from(offset).ok()?;
        let tail = self.buf.get(start..)?;
        let len = tail.iter().position(|&b| b == TERMINATOR)?;
        Some(&tail[..len])
    }
}

/// Накопитель байт для сериализации.
pub struct ByteWriter {
    buf: Vec<u8>,
    endian: Endian,
}

impl ByteWriter {
    pub fn with_capacity(cap: usize, endian: Endian) -> Self {
        Self { buf: Vec::with_capacity(cap), endian }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    pub fn write_u32(&mut self, v: u32) {
        let mut b = [0u8; 4];
        match self.endian {
            Endian::Big => BigEndian::write_u32(&mut b, v),
            Endian::Little => LittleEndian::write_u32(&mut b, v),
        }
        self.buf.extend_from_slice(&b);
    }

    pub fn write_u64(&mut self, v: u64) {
        let mut b = [0u8; 8];
        match self.endian {
            Endian::Big => BigEndian::write_u64(&mut b, v),
            Endian::Little => LittleEndian::write_u64(&mut b, v),
        }
        self.buf.extend_from_slice(&b);
    }

    /// Записать указатель; значение, не влезающее в ширину, — ошибка (line — для диагностики).
    pub fn write_ptr(&mut self, width: PointerWidth, v: u64, line: usize) -> Result<()> {
        if v > width.max_value() {
            return Err(ChtxError::PointerTooWide {
                line,
                value: v,
                width: width.bytes(),
            });
        }
        match width {
            PointerWidth::B32 => self.write_u32(v as u32),
            PointerWidth::B64 => self.write_u64(v),
        }
        Ok(())
    }

    /// Строка пула: байты + один терминатор.
    pub fn write_cstr(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
        self.buf.push(TERMINATOR);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}
