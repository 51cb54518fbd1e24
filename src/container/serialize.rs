//! container/serialize — Container -> bytes.
//!
//! Пишет ровно то, что лежит в полях: заголовок, таблицу, затем пул в порядке
//! (name, языки) по строкам. Указатели не проверяются на соответствие пулу — после
//! правок строк сначала recalculate().

use super::{Container, PoolField};
use crate::codec::ByteWriter;
use crate::consts::HEADER_SIZE;
use crate::error::{ChtxError, Result};

impl Container {
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut w = ByteWriter::with_capacity(self.header.file_size as usize, self.byte_order);

        let mut header = self.header.clone();
        header.line_count = self.lines.len() as u32;
        header.write(&mut w);
        debug_assert_eq!(w.len(), HEADER_SIZE);

        for (i, line) in self.lines.iter().enumerate() {
            self.check_slots(i, line)?;
            w.write_ptr(self.pointer_width, line.name_pointer, i)?;
            for &ptr in &line.text_pointers {
                w.write_ptr(self.pointer_width, ptr, i)?;
            }
            w.write_bytes(&line.unknown);
        }

        // Пул начинается сразу за таблицей: text_start обязан указывать туда же.
        if w.len() as u64 != self.header.text_start as u64 {
            return Err(ChtxError::TextStartMismatch {
                text_start: self.header.text_start,
                table_end: w.len() as u64,
            });
        }

        for (i, line) in self.lines.iter().enumerate() {
            w.write_cstr(&line.encode_field(self.encoding, i, PoolField::Name)?);
            for slot in 0..line.texts.len() {
                w.write_cstr(&line.encode_field(self.encoding, i, PoolField::Text(slot))?);
            }
        }

        Ok(w.into_inner())
    }
}
