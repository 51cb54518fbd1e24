//! container/recalc — пересчёт указателей пула и file_size после правок.
//!
//! Курсор стартует с text_start; для каждой строки по порядку: name, затем слоты языков.
//! Каждая строка занимает encoded_len + 1 (терминатор). Одинаковые строки не разделяются.
//! Неизменённые поля считаются по исходным байтам пула (см. pool).

use log::debug;

use super::{Container, PoolField};
use crate::error::{ChtxError, Result};

impl Container {
    /// Выставить name_pointer/text_pointers и header.file_size по текущему содержимому.
    /// Вызывать после любой правки строк и перед serialize().
    pub fn recalculate(&mut self) -> Result<()> {
        let text_start = self.header.text_start as u64;
        let encoding = self.encoding;
        let mut cursor = text_start;

        for index in 0..self.lines.len() {
            self.check_slots(index, &self.lines[index])?;
            let line = &mut self.lines[index];

            line.name_pointer = cursor - text_start;
            cursor += line.encoded_len(encoding, index, PoolField::Name)? as u64 + 1;

            for slot in 0..line.texts.len() {
                line.text_pointers[slot] = cursor - text_start;
                cursor += line.encoded_len(encoding, index, PoolField::Text(slot))? as u64 + 1;
            }
        }

        self.header.file_size =
            u32::try_from(cursor).map_err(|_| ChtxError::PoolTooLarge { size: cursor })?;

        debug!(
            "recalculated {} lines: pool {} B, file_size={}",
            self.lines.len(),
            cursor - text_start,
            self.header.file_size
        );
        Ok(())
    }
}
