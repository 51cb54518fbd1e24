//! container/header — 32-байтовый заголовок TO8CHTX.

use crate::codec::{ByteReader, ByteWriter};
use crate::consts::{HEADER_SIZE, IDENTIFY_LEN, MAGIC};
use crate::error::Result;

/// Заголовок контейнера. identify/unknown/reserved — непрозрачные байты, порядок байт к ним
/// не применяется и при записи они возвращаются как были.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatHeader {
    pub identify: [u8; IDENTIFY_LEN],
    pub file_size: u32,
    pub line_count: u32,
    pub unknown: [u8; 4],
    pub text_start: u32,
    pub reserved: [u8; 8],
}

impl ChatHeader {
    /// Заголовок для контейнера, собираемого в памяти.
    pub fn fresh() -> Self {
        let mut identify = [0u8; IDENTIFY_LEN];
        identify[..MAGIC.len()].copy_from_slice(MAGIC);
        Self {
            identify,
            file_size: HEADER_SIZE as u32,
            line_count: 0,
            unknown: [0; 4],
            text_start: HEADER_SIZE as u32,
            reserved: [0; 8],
        }
    }

    pub fn read(r: &mut ByteReader<'_>) -> Result<Self> {
        Ok(Self {
            identify: r.read_array()?,
            file_size: r.read_u32()?,
            line_count: r.read_u32()?,
            unknown: r.read_array()?,
            text_start: r.read_u32()?,
            reserved: r.read_array()?,
        })
    }

    pub fn write(&self, w: &mut ByteWriter) {
        w.write_bytes(&self.identify);
        w.write_u32(self.file_size);
        w.write_u32(self.line_count);
        w.write_bytes(&self.unknown);
        w.write_u32(self.text_start);
        w.write_bytes(&self.reserved);
    }
}
