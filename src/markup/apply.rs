//! markup/apply — текст -> правки name/texts в Container.
//!
//! Однопроходный автомат с двумя состояниями:
//! - Outside: `#` и пустые строки пропускаются; маркер LINE меняет текущую строку;
//!   `[LABEL]` открывает блок; всё остальное — ошибка.
//! - Inside: строка, равная `[/LABEL]`, сбрасывает тело в поле и возвращает в Outside;
//!   любая другая строка (включая `#...`) — часть тела.
//! Метка проверяется при открытии блока, поэтому ошибка указывает на строку с `[LABEL]`.
//! Закрытые блоки копятся в списке правок и применяются только после успешного разбора.

use super::{parse_label, parse_line_marker, BlockTarget, ParsedLabel};
use crate::container::Container;
use crate::error::{ChtxError, Result};

/// Открытый блок: куда писать и накопленные строки тела.
struct OpenBlock<'a> {
    label: &'a str,
    line: usize,
    target: BlockTarget,
    opened_at: usize,
    body: Vec<&'a str>,
}

enum State<'a> {
    Outside,
    Inside(OpenBlock<'a>),
}

/// Готовое значение поля.
struct Edit {
    line: usize,
    target: BlockTarget,
    value: String,
}

/// Применить markup к контейнеру. При ошибке контейнер не меняется.
pub fn apply_markup(c: &mut Container, text: &str) -> Result<()> {
    let mut current_line: Option<usize> = None;
    let mut state = State::Outside;
    let mut edits = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let text_line = i + 1;
        state = match state {
            State::Outside => outside(c, raw, text_line, &mut current_line)?,
            State::Inside(block) => inside(block, raw, &mut edits),
        };
    }

    if let State::Inside(block) = state {
        return Err(ChtxError::UnclosedBlock {
            label: block.label.to_string(),
            text_line: block.opened_at,
        });
    }

    // индексы проверены при открытии блоков
    for Edit { line, target, value } in edits {
        let line = &mut c.lines[line];
        match target {
            BlockTarget::Name => line.name = value,
            BlockTarget::Text(slot) => line.texts[slot] = value,
        }
    }
    Ok(())
}

fn outside<'a>(
    c: &Container,
    raw: &'a str,
    text_line: usize,
    current_line: &mut Option<usize>,
) -> Result<State<'a>> {
    if raw.starts_with('#') || raw.trim().is_empty() {
        return Ok(State::Outside);
    }

    if let Some(marker) = parse_line_marker(raw) {
        let index = marker.ok_or_else(|| ChtxError::BadLineMarker {
            text_line,
            content: raw.to_string(),
        })?;
        if index >= c.line_count() {
            return Err(ChtxError::LineOutOfRange {
                text_line,
                index,
                line_count: c.line_count(),
            });
        }
        *current_line = Some(index);
        return Ok(State::Outside);
    }

    if raw.starts_with('[') && raw.ends_with(']') && !raw.starts_with("[/") && raw.len() > 2 {
        let label = &raw[1..raw.len() - 1];
        let line = current_line.ok_or_else(|| ChtxError::BlockOutsideLine {
            text_line,
            label: label.to_string(),
        })?;
        let target = resolve_label(c, label, line, text_line)?;
        return Ok(State::Inside(OpenBlock {
            label,
            line,
            target,
            opened_at: text_line,
            body: Vec::new(),
        }));
    }

    Err(ChtxError::UnexpectedContent {
        text_line,
        content: raw.to_string(),
    })
}

fn inside<'a>(mut block: OpenBlock<'a>, raw: &'a str, edits: &mut Vec<Edit>) -> State<'a> {
    let closes = raw
        .strip_prefix("[/")
        .and_then(|s| s.strip_suffix(']'))
        .map_or(false, |l| l == block.label);
    if !closes {
        block.body.push(raw);
        return State::Inside(block);
    }

    edits.push(Edit {
        line: block.line,
        target: block.target,
        value: block.body.join("\n"),
    });
    State::Outside
}

fn resolve_label(c: &Container, label: &str, line: usize, text_line: usize) -> Result<BlockTarget> {
    let out_of_range = || ChtxError::LanguageOutOfRange {
        text_line,
        label: label.to_string(),
        line,
        language_count: c.language_count,
    };
    match parse_label(label) {
        ParsedLabel::Target(BlockTarget::Name) => Ok(BlockTarget::Name),
        ParsedLabel::Target(BlockTarget::Text(slot)) => {
            if slot < c.lines[line].texts.len() {
                Ok(BlockTarget::Text(slot))
            } else {
                Err(out_of_range())
            }
        }
        ParsedLabel::SlotOverflow => Err(out_of_range()),
        ParsedLabel::Unknown => Err(ChtxError::UnknownBlockLabel {
            text_line,
            label: label.to_string(),
            line,
        }),
    }
}
