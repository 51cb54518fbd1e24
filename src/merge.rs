//! merge — обмен строками с внешним хранилищем переводов (плоская таблица строк).
//!
//! Хранилище адресует поле по «pointer reference» — смещению поля в таблице контейнера
//! при фиксированной 16-байтовой записи (B32, 2 языка):
//!   ref % 16 == 0  -> name строки ref/16 - 2
//!   ref % 16 == 4  -> texts[1] строки (ref-4)/16 - 2
//! Остальные остатки хранилище не использует; такие строки пропускаются.
//!
//! Строки приходят из таблицы Text хранилища (store::TextStore); арифметика от носителя
//! не зависит.

use log::{debug, warn};

use crate::consts::{STORE_DUMMY_TEXT, STORE_ENTRY_STRIDE, STORE_TEXT_SLOT};
use crate::container::Container;
use crate::error::{ChtxError, Result};

/// Строка хранилища на вход merge: Text.english, Text.PointerRef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreRow {
    pub text: Option<String>,
    pub pointer_ref: i64,
}

/// Запись для первичного наполнения хранилища из контейнера.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub jp: String,
    pub en: String,
    /// 1 — английский текст есть, 0 — подставлен японский.
    pub status: i32,
    pub pointer_ref: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub names: usize,
    pub texts: usize,
    pub skipped: usize,
}

/// Адрес поля, вычисленный по pointer reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreField {
    Name { line: i64 },
    Text { line: i64 },
}

pub fn decode_pointer_ref(pointer_ref: i64) -> Option<StoreField> {
    match pointer_ref.rem_euclid(STORE_ENTRY_STRIDE) {
        0 => Some(StoreField::Name {
            line: pointer_ref.div_euclid(STORE_ENTRY_STRIDE) - 2,
        }),
        4 => Some(StoreField::Text {
            line: (pointer_ref - 4).div_euclid(STORE_ENTRY_STRIDE) - 2,
        }),
        _ => None,
    }
}

/// Перезаписать name/texts[1] по строкам хранилища. Строки обрабатываются по возрастанию
/// pointer_ref; пустой/отсутствующий текст пропускается, `''` разворачивается в `'`.
/// После merge нужен recalculate().
pub fn apply_pointer_refs(c: &mut Container, rows: &[StoreRow]) -> Result<MergeStats> {
    let mut ordered: Vec<&StoreRow> = rows.iter().collect();
    ordered.sort_by_key(|r| r.pointer_ref);

    let mut stats = MergeStats::default();
    for row in ordered {
        let text = match row.text.as_deref() {
            Some(t) if !t.is_empty() => t.replace("''", "'"),
            _ => {
                stats.skipped += 1;
                continue;
            }
        };

        let field = match decode_pointer_ref(row.pointer_ref) {
            Some(f) => f,
            None => {
                warn!("merge: pointer_ref {} addresses no known field, skipped", row.pointer_ref);
                stats.skipped += 1;
                continue;
            }
        };

        let (StoreField::Name { line } | StoreField::Text { line }) = field;
        let index = usize::try_from(line)
            .ok()
            .filter(|&i| i < c.line_count())
            .ok_or(ChtxError::PointerRefOutOfRange {
                pointer_ref: row.pointer_ref,
                line,
                line_count: c.line_count(),
            })?;

        match field {
            StoreField::Name { .. } => {
                c.lines[index].name = text;
                stats.names += 1;
            }
            StoreField::Text { .. } => {
                let have = c.language_count;
                let slot = c.lines[index]
                    .texts
                    .get_mut(STORE_TEXT_SLOT)
                    .ok_or(ChtxError::NotEnoughLanguages {
                        need: STORE_TEXT_SLOT + 1,
                        have,
                    })?;
                *slot = text;
                stats.texts += 1;
            }
        }
    }

    debug!(
        "merge: {} names, {} texts, {} rows skipped",
        stats.names, stats.texts, stats.skipped
    );
    Ok(stats)
}

/// Выгрузить контейнер в записи хранилища: name по смещению записи и texts[0]/texts[1]
/// по смещению + 4. Если английский текст пустой или "Dummy", подставляется японский (status 0).
pub fn export_rows(c: &Container) -> Result<Vec<ExportEntry>> {
    if c.language_count < STORE_TEXT_SLOT + 1 {
        return Err(ChtxError::NotEnoughLanguages {
            need: STORE_TEXT_SLOT + 1,
            have: c.language_count,
        });
    }

    let mut out = Vec::with_capacity(c.line_count() * 2);
    for (i, line) in c.lines.iter().enumerate() {
        let location = c.table_offset(i) as i64;
        let jp = &line.texts[0];
        let en = &line.texts[STORE_TEXT_SLOT];
        let (en, status) = if en.is_empty() || en == STORE_DUMMY_TEXT {
            (jp.clone(), 0)
        } else {
            (en.clone(), 1)
        };

        out.push(ExportEntry {
            jp: line.name.clone(),
            en: line.name.clone(),
            status: 1,
            pointer_ref: location,
        });
        out.push(ExportEntry {
            jp: jp.clone(),
            en,
            status,
            pointer_ref: location + 4,
        });
    }
    Ok(out)
}
