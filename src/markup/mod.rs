//! markup — человекочитаемый round-trip формат для офлайн-правки строк.
//!
//! Формат (UTF-8, переводы строк нормализованы к \n):
//!   # TO8CHTX TXT v2
//!   # Encoding=UTF8
//!   # AutoDetectedBitness=B32            (только если раскладка определялась)
//!   # AutoDetectedLanguageCount=2
//!
//!   === LINE 0 ===
//!   [NAME]
//!   ...
//!   [/NAME]
//!   [L00]
//!   ...
//!   [/L00]
//!
//! Ширина номера в L<NN> косметическая: при чтении это просто целое.
//! При чтении принимается и короткий маркер `LINE <n>`.

pub mod apply;
pub mod extract;

pub use apply::apply_markup;
pub use extract::extract_markup;

use crate::consts::{LINE_MARKER_PREFIX, LINE_MARKER_SUFFIX, NAME_LABEL};

/// Поле строки, в которое пишет блок.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTarget {
    Name,
    Text(usize),
}

impl BlockTarget {
    pub fn label(self) -> String {
        match self {
            BlockTarget::Name => NAME_LABEL.to_string(),
            BlockTarget::Text(slot) => format!("L{:02}", slot),
        }
    }
}

/// Результат разбора метки блока (без проверки границ).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsedLabel {
    Target(BlockTarget),
    /// L<digits>, но число не влезает в usize.
    SlotOverflow,
    Unknown,
}

pub(crate) fn parse_label(label: &str) -> ParsedLabel {
    if label == NAME_LABEL {
        return ParsedLabel::Target(BlockTarget::Name);
    }
    match label.strip_prefix('L') {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            match digits.parse::<usize>() {
                Ok(slot) => ParsedLabel::Target(BlockTarget::Text(slot)),
                Err(_) => ParsedLabel::SlotOverflow,
            }
        }
        _ => ParsedLabel::Unknown,
    }
}

pub(crate) fn line_marker(index: usize) -> String {
    format!("{}{}{}", LINE_MARKER_PREFIX, index, LINE_MARKER_SUFFIX)
}

/// Some(Some(n)) — маркер с числом, Some(None) — маркер с мусором вместо числа, None — не маркер.
pub(crate) fn parse_line_marker(line: &str) -> Option<Option<usize>> {
    let inner = line
        .strip_prefix(LINE_MARKER_PREFIX)
        .and_then(|s| s.strip_suffix(LINE_MARKER_SUFFIX))
        .or_else(|| line.strip_prefix("LINE "))?;
    Some(inner.trim().parse::<usize>().ok())
}
