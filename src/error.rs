//! error — единая таксономия ошибок библиотеки.
//!
//! Группы:
//! - format: геометрия заголовка/таблицы, усечённые данные, указатели за пределами пула;
//! - encoding: неизвестная кодировка, невозможность закодировать/декодировать строку;
//! - markup: синтаксис текстового формата (номер строки текста всегда 1-based);
//! - merge: ссылки на записи внешнего хранилища;
//! - store: ошибки SQLite (текст ошибки rusqlite, чтобы ChtxError оставался Clone + Eq).
//!
//! Ни одна ошибка не восстанавливается локально: операция прерывается целиком.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChtxError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChtxError {
    // ---------- format ----------
    #[error("file too small for TO8CHTX header: {len} B (need {need} B)")]
    TooSmall { len: usize, need: usize },

    #[error("not a TO8CHTX file (identify = {found:02x?})")]
    BadMagic { found: [u8; 8] },

    #[error("TO8CHTX has 0 lines")]
    ZeroLines,

    #[error("invalid TO8CHTX text start {text_start:#x} (must be >= {min:#x})")]
    TextStartTooSmall { text_start: u32, min: u32 },

    #[error("pointer table size {table_size} is not a positive multiple of line count {line_count}")]
    TableNotDivisible { table_size: u64, line_count: u32 },

    #[error("could not determine pointer width/language count from entry size {entry_size}")]
    NoLayoutCandidate { entry_size: u64 },

    #[error("header file size {declared} is larger than actual file ({actual} B)")]
    FileSizeExceedsActual { declared: u32, actual: u64 },

    #[error("truncated data at offset {offset:#x}: need {needed} B, have {available} B")]
    Truncated { offset: u64, needed: usize, available: u64 },

    #[error("line {line} {field}: string at offset {offset:#x} is out of range")]
    PointerOutOfRange { line: usize, field: String, offset: u64 },

    #[error("line {line}: pointer {value:#x} does not fit into {width} bytes")]
    PointerTooWide { line: usize, value: u64, width: usize },

    #[error("text start {text_start:#x} does not match end of pointer table {table_end:#x}")]
    TextStartMismatch { text_start: u32, table_end: u64 },

    #[error("string pool grew past 4 GiB ({size} B)")]
    PoolTooLarge { size: u64 },

    #[error("line {line}: expected {expected} text slots, found {found}")]
    SlotCountMismatch { line: usize, expected: usize, found: usize },

    // ---------- encoding ----------
    #[error("unknown encoding '{0}' (expected ShiftJIS, UTF8 or ASCII)")]
    UnknownEncoding(String),

    #[error("cannot encode {what} as {encoding}: {reason}")]
    Encode { what: String, encoding: &'static str, reason: String },

    #[error("cannot decode string at offset {offset:#x} as {encoding}")]
    Decode { offset: u64, encoding: &'static str },

    // ---------- markup ----------
    #[error("text line {text_line}: LINE {index} is out of range (container has {line_count} lines)")]
    LineOutOfRange { text_line: usize, index: usize, line_count: usize },

    #[error("text line {text_line}: malformed line marker '{content}'")]
    BadLineMarker { text_line: usize, content: String },

    #[error("text line {text_line}: unknown block [{label}] on line {line}")]
    UnknownBlockLabel { text_line: usize, label: String, line: usize },

    #[error("text line {text_line}: language index out of range in block [{label}] on line {line} (languages: {language_count})")]
    LanguageOutOfRange { text_line: usize, label: String, line: usize, language_count: usize },

    #[error("text line {text_line}: block [{label}] opened before any LINE marker")]
    BlockOutsideLine { text_line: usize, label: String },

    #[error("text line {text_line}: unexpected line outside block: {content}")]
    UnexpectedContent { text_line: usize, content: String },

    #[error("unclosed block [{label}] (opened at text line {text_line}) at end of text")]
    UnclosedBlock { label: String, text_line: usize },

    // ---------- merge ----------
    #[error("pointer reference {pointer_ref} addresses line {line}, container has {line_count} lines")]
    PointerRefOutOfRange { pointer_ref: i64, line: i64, line_count: usize },

    #[error("store rows need at least {need} languages, container has {have}")]
    NotEnoughLanguages { need: usize, have: usize },

    // ---------- store ----------
    #[error("translation store: {context}: {reason}")]
    Store { context: &'static str, reason: String },
}
