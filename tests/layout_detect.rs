use anyhow::Result;

use to8chtx::layout::{decode_entry_size, detect_from_geometry, HeaderGeometry};
use to8chtx::{
    detect_layout, detect_layout_with, ChatLine, ChtxError, CodecConfig, Container, Endian,
    PointerWidth,
};

/// Заголовок TO8CHTX (BE) + нули до text_start, чтобы байты выглядели как файл.
fn header_bytes(line_count: u32, text_start: u32, file_size: u32) -> Vec<u8> {
    let mut b = Vec::new();
    b.extend_from_slice(b"TO8CHTX\0");
    b.extend_from_slice(&file_size.to_be_bytes());
    b.extend_from_slice(&line_count.to_be_bytes());
    b.extend_from_slice(&[0; 4]);
    b.extend_from_slice(&text_start.to_be_bytes());
    b.extend_from_slice(&[0; 8]);
    b.resize((text_start as usize).max(32), 0);
    b
}

#[test]
fn narrow_two_languages_ten_lines() -> Result<()> {
    // entry = 4 + 3*4 = 16; text_start = 32 + 160 = 192
    let l = detect_layout(&header_bytes(10, 192, 0))?;
    assert_eq!(l.pointer_width, PointerWidth::B32);
    assert_eq!(l.language_count, 2);
    assert_eq!(l.entry_size, 16);
    Ok(())
}

#[test]
fn wide_one_language() -> Result<()> {
    // entry = 4 + 2*8 = 20
    let l = detect_layout(&header_bytes(4, 32 + 4 * 20, 0))?;
    assert_eq!(l.pointer_width, PointerWidth::B64);
    assert_eq!(l.language_count, 1);
    Ok(())
}

#[test]
fn wide_rejected_when_not_aligned() -> Result<()> {
    // entry 24: (24-4) % 8 != 0 -> только B32, 20/4-1 = 4
    assert_eq!(decode_entry_size(24, PointerWidth::B64), None);
    let l = detect_layout(&header_bytes(3, 32 + 3 * 24, 0))?;
    assert_eq!(l.pointer_width, PointerWidth::B32);
    assert_eq!(l.language_count, 4);
    Ok(())
}

#[test]
fn ambiguous_entry_prefers_wide() -> Result<()> {
    // entry 36 валиден для обоих: B64 -> 3 языка, B32 -> 7 языков
    assert_eq!(decode_entry_size(36, PointerWidth::B32), Some(7));
    let l = detect_layout(&header_bytes(5, 32 + 5 * 36, 0))?;
    assert_eq!(l.pointer_width, PointerWidth::B64);
    assert_eq!(l.language_count, 3);
    Ok(())
}

#[test]
fn no_candidate_for_odd_entries() {
    // 10: 6 не делится ни на 8, ни на 4; 8: B32 даёт 0 языков
    for entry in [10u32, 8, 5] {
        let err = detect_layout(&header_bytes(2, 32 + 2 * entry, 0)).unwrap_err();
        assert_eq!(
            err,
            ChtxError::NoLayoutCandidate {
                entry_size: entry as u64
            }
        );
    }
}

#[test]
fn rejection_cases() {
    assert_eq!(
        detect_layout(&header_bytes(0, 192, 0)).unwrap_err(),
        ChtxError::ZeroLines
    );
    assert_eq!(
        detect_layout(&header_bytes(10, 16, 0)).unwrap_err(),
        ChtxError::TextStartTooSmall {
            text_start: 16,
            min: 32
        }
    );
    // пустая таблица
    assert!(matches!(
        detect_layout(&header_bytes(1, 32, 0)).unwrap_err(),
        ChtxError::TableNotDivisible { table_size: 0, .. }
    ));
    // 161 не делится на 10
    assert_eq!(
        detect_layout(&header_bytes(10, 193, 0)).unwrap_err(),
        ChtxError::TableNotDivisible {
            table_size: 161,
            line_count: 10
        }
    );
}

#[test]
fn bad_magic_and_short_input() {
    let mut b = header_bytes(10, 192, 0);
    b[0..8].copy_from_slice(b"TO8CHTY\0");
    assert!(matches!(
        detect_layout(&b).unwrap_err(),
        ChtxError::BadMagic { .. }
    ));

    assert_eq!(
        detect_layout(&b[..20]).unwrap_err(),
        ChtxError::TooSmall { len: 20, need: 32 }
    );
}

#[test]
fn declared_size_larger_than_file() {
    let b = header_bytes(10, 192, 500);
    assert_eq!(
        detect_layout(&b).unwrap_err(),
        ChtxError::FileSizeExceedsActual {
            declared: 500,
            actual: 192
        }
    );

    // без известной длины проверка не выполняется
    let g = HeaderGeometry::read(&b, Endian::Big).unwrap();
    assert!(detect_from_geometry(&g, None).is_ok());
}

#[test]
fn little_endian_header_needs_matching_order() -> Result<()> {
    let cfg = CodecConfig::default()
        .with_byte_order(Endian::Little)
        .with_pointer_width(PointerWidth::B64)
        .with_language_count(3);
    let mut c = Container::new(&cfg);
    for i in 0..16 {
        c.push_line(ChatLine::new(
            format!("n{}", i),
            vec!["jp".into(), "en".into(), "fr".into()],
        ))?;
    }
    c.recalculate()?;
    let bytes = c.serialize()?;

    let l = detect_layout_with(&bytes, Endian::Little)?;
    assert_eq!(l.pointer_width, PointerWidth::B64);
    assert_eq!(l.language_count, 3);
    assert_eq!(l.entry_size, 36);

    // тот же файл, прочитанный как BE, даёт мусорную геометрию
    assert!(detect_layout(&bytes).is_err());

    let back = Container::parse(&bytes, &cfg.clone().with_layout(l))?;
    assert_eq!(back.serialize()?, bytes);
    Ok(())
}
