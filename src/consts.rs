//! Общие константы формата TO8CHTX (header, pointer table, string pool, markup).

// -------- Header --------
/// ASCII-магия в первых 8 байтах (NUL-терминирована внутри поля identify).
pub const MAGIC: &[u8; 7] = b"TO8CHTX";
pub const IDENTIFY_LEN: usize = 8;

/// Фиксированный заголовок: [identify 8][file_size u32][lines u32][unknown 4][text_start u32][reserved 8]
pub const HEADER_SIZE: usize = 32;

pub const OFF_IDENTIFY: usize = 0x00;
pub const OFF_FILE_SIZE: usize = 0x08;
pub const OFF_LINE_COUNT: usize = 0x0C;
pub const OFF_UNKNOWN: usize = 0x10;
pub const OFF_TEXT_START: usize = 0x14;
pub const OFF_RESERVED: usize = 0x18;

// -------- Pointer table --------
/// Непрозрачное поле в конце каждой записи таблицы.
pub const LINE_UNKNOWN_LEN: usize = 4;

// -------- String pool --------
pub const TERMINATOR: u8 = 0x00;

/// Символ-заполнитель, который игра рисует как пробел (только для display-выгрузки).
pub const PLACEHOLDER: char = '@';

// -------- Markup --------
pub const MARKUP_VERSION_LINE: &str = "# TO8CHTX TXT v2";
pub const LINE_MARKER_PREFIX: &str = "=== LINE ";
pub const LINE_MARKER_SUFFIX: &str = " ===";
pub const NAME_LABEL: &str = "NAME";

// -------- Translation store --------
// Схема внешнего хранилища предполагает 16-байтовые записи (B32, 2 языка).
pub const STORE_ENTRY_STRIDE: i64 = 16;
pub const STORE_TEXT_SLOT: usize = 1;
pub const STORE_DUMMY_TEXT: &str = "Dummy";
