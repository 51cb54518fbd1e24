//! markup/extract — Container -> текст.

use std::fmt::Write as _;

use super::{line_marker, BlockTarget};
use crate::consts::MARKUP_VERSION_LINE;
use crate::container::Container;
use crate::layout::Layout;

/// Выгрузить контейнер в markup. detected — раскладка, если она определялась автоматически
/// (пишется в шапку для воспроизводимости).
pub fn extract_markup(c: &Container, detected: Option<&Layout>) -> String {
    let mut out = String::new();
    out.push_str(MARKUP_VERSION_LINE);
    out.push('\n');
    let _ = writeln!(out, "# Encoding={}", c.encoding);
    if let Some(l) = detected {
        let _ = writeln!(out, "# AutoDetectedBitness={}", l.pointer_width);
        let _ = writeln!(out, "# AutoDetectedLanguageCount={}", l.language_count);
    }
    out.push('\n');

    for (i, line) in c.lines.iter().enumerate() {
        out.push_str(&line_marker(i));
        out.push('\n');
        write_block(&mut out, BlockTarget::Name, &line.name);
        for (slot, text) in line.texts.iter().enumerate() {
            write_block(&mut out, BlockTarget::Text(slot), text);
        }
        out.push('\n');
    }
    out
}

fn write_block(out: &mut String, target: BlockTarget, value: &str) {
    let label = target.label();
    let _ = writeln!(out, "[{}]", label);
    if !value.is_empty() {
        out.push_str(&value.replace("\r\n", "\n").replace('\r', "\n"));
        out.push('\n');
    }
    let _ = writeln!(out, "[/{}]", label);
}
