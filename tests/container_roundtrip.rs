use anyhow::Result;
use oorandom::Rand64;

use to8chtx::{
    detect_layout, ChatLine, ChtxError, CodecConfig, Container, Endian, PointerWidth,
    TextEncoding,
};

/// Файл, собранный вручную (BE, B32, 2 языка, 2 строки) с непустыми непрозрачными полями.
fn handmade_file() -> Vec<u8> {
    let pool: &[u8] = b"Yuri\0Hello\0Hi\0\0Dummy\0Dummy\0";
    let text_start = 32u32 + 2 * 16;
    let mut b = Vec::new();
    b.extend_from_slice(b"TO8CHTX\0");
    b.extend_from_slice(&(text_start + pool.len() as u32).to_be_bytes());
    b.extend_from_slice(&2u32.to_be_bytes());
    b.extend_from_slice(&[0x00, 0x01, 0x02, 0x03]);
    b.extend_from_slice(&text_start.to_be_bytes());
    b.extend_from_slice(&[0xEE; 8]);
    // line 0: name=0 "Yuri", L00=5 "Hello", L01=11 "Hi"
    for v in [0u32, 5, 11] {
        b.extend_from_slice(&v.to_be_bytes());
    }
    b.extend_from_slice(&[0xCA, 0xFE, 0x00, 0x01]);
    // line 1: name=14 "", L00=15 "Dummy", L01=21 "Dummy"
    for v in [14u32, 15, 21] {
        b.extend_from_slice(&v.to_be_bytes());
    }
    b.extend_from_slice(&[0xCA, 0xFE, 0x00, 0x02]);
    b.extend_from_slice(pool);
    b
}

#[test]
fn parse_then_serialize_is_byte_identical() -> Result<()> {
    let bytes = handmade_file();
    let layout = detect_layout(&bytes)?;
    let cfg = CodecConfig::default().with_layout(layout);

    let c = Container::parse(&bytes, &cfg)?;
    assert_eq!(c.lines[1].texts, vec!["Dummy".to_string(), "Dummy".to_string()]);
    assert_eq!(c.serialize()?, bytes);

    // разметка уже последовательная: recalculate ничего не меняет
    let mut c2 = c.clone();
    c2.recalculate()?;
    assert_eq!(c2, c);
    Ok(())
}

#[test]
fn edit_recalculate_serialize() -> Result<()> {
    let bytes = handmade_file();
    let cfg = CodecConfig::default().with_layout(detect_layout(&bytes)?);
    let mut c = Container::parse(&bytes, &cfg)?;

    c.lines[0].texts[1] = "Hello there, Estelle.".to_string();
    c.recalculate()?;
    let out = c.serialize()?;

    assert_eq!(out.len(), c.header.file_size as usize);
    assert_eq!(out.len(), bytes.len() + "Hello there, Estelle.".len() - "Hi".len());
    // непрозрачные поля не тронуты
    assert_eq!(&out[0x10..0x14], &[0x00, 0x01, 0x02, 0x03]);
    assert_eq!(&out[0x18..0x20], &[0xEE; 8]);

    let back = Container::parse(&out, &cfg)?;
    assert_eq!(back.lines[0].texts[1], "Hello there, Estelle.");
    assert_eq!(back.lines[1].name_pointer, 14 + 19);
    assert_eq!(back.lines[1].unknown, [0xCA, 0xFE, 0x00, 0x02]);
    Ok(())
}

#[test]
fn detected_layout_roundtrip_for_shift_jis() -> Result<()> {
    let cfg = CodecConfig::default().with_encoding(TextEncoding::ShiftJis);
    let mut c = Container::new(&cfg);
    c.push_line(ChatLine::new("ジュディス", vec!["あら、そう？".into(), "Oh, really?".into()]))?;
    c.push_line(ChatLine::new("レイヴン", vec!["おっさん@いじめ".into(), "".into()]))?;
    c.recalculate()?;
    let bytes = c.serialize()?;

    let layout = detect_layout(&bytes)?;
    assert_eq!(layout.pointer_width, PointerWidth::B32);
    assert_eq!(layout.language_count, 2);

    let back = Container::parse(&bytes, &cfg.clone().with_layout(layout))?;
    assert_eq!(back.lines[1].texts[0], "おっさん@いじめ");
    assert_eq!(back.serialize()?, bytes);

    // display-режим меняет только заполнитель
    let shown = Container::parse(&bytes, &cfg.with_replace_placeholder(true))?;
    assert_eq!(shown.lines[1].texts[0], "おっさん いじめ");
    assert_eq!(shown.lines[1].name, "レイヴン");
    Ok(())
}

#[test]
fn wrong_encoding_is_decode_error() -> Result<()> {
    let cfg = CodecConfig::default().with_encoding(TextEncoding::ShiftJis);
    let mut c = Container::new(&cfg);
    c.push_line(ChatLine::new("カロル", vec!["a".into(), "b".into()]))?;
    c.recalculate()?;
    let bytes = c.serialize()?;

    let err = Container::parse(&bytes, &CodecConfig::default().with_encoding(TextEncoding::Ascii))
        .unwrap_err();
    assert!(matches!(err, ChtxError::Decode { offset: 48, encoding: "ASCII" }));
    Ok(())
}

const ALPHABET: &[char] = &[
    'a', 'Z', ' ', '@', '!', '\'', '\n', 'ア', 'ー', '星', '喰', 'み', '。', '「', '」',
];

fn random_text(rng: &mut Rand64, max_len: u64) -> String {
    let len = rng.rand_range(0..max_len + 1);
    (0..len)
        .map(|_| ALPHABET[rng.rand_range(0..ALPHABET.len() as u64) as usize])
        .collect()
}

#[test]
fn randomized_roundtrip_all_layouts() -> Result<()> {
    let mut rng = Rand64::new(0xC0FFEE);
    let layouts = [
        (PointerWidth::B32, 2usize, Endian::Big),
        (PointerWidth::B32, 5, Endian::Little),
        (PointerWidth::B64, 1, Endian::Big),
        (PointerWidth::B64, 3, Endian::Little),
    ];

    for (width, langs, endian) in layouts {
        for encoding in [TextEncoding::Utf8, TextEncoding::ShiftJis] {
            let cfg = CodecConfig::default()
                .with_pointer_width(width)
                .with_language_count(langs)
                .with_byte_order(endian)
                .with_encoding(encoding);

            let mut c = Container::new(&cfg);
            let lines = rng.rand_range(1..40);
            for _ in 0..lines {
                let texts = (0..langs).map(|_| random_text(&mut rng, 24)).collect();
                let mut line = ChatLine::new(random_text(&mut rng, 8), texts);
                line.unknown = (rng.rand_u64() as u32).to_be_bytes();
                c.push_line(line)?;
            }
            c.header.unknown = [1, 2, 3, 4];
            c.header.reserved = (rng.rand_u64()).to_le_bytes();
            c.recalculate()?;

            let bytes = c.serialize()?;
            assert_eq!(bytes.len(), c.header.file_size as usize);

            let back = Container::parse(&bytes, &cfg)?;
            assert_eq!(back, c, "layout {} x{} {} {}", width, langs, endian, encoding);
            assert_eq!(back.serialize()?, bytes);

            // идемпотентность
            let mut again = back.clone();
            again.recalculate()?;
            assert_eq!(again, back);
        }
    }
    Ok(())
}

/// BE, B32, 2 языка, одна строка; name = NEC 0x8790, L00 = IBM-расширение 0xED40 + "x".
fn nec_file() -> Vec<u8> {
    let pool: &[u8] = &[0x87, 0x90, 0x00, 0xED, 0x40, b'x', 0x00, 0x00];
    let mut b = Vec::new();
    b.extend_from_slice(b"TO8CHTX\0");
    b.extend_from_slice(&(48u32 + pool.len() as u32).to_be_bytes());
    b.extend_from_slice(&1u32.to_be_bytes());
    b.extend_from_slice(&[0; 4]);
    b.extend_from_slice(&48u32.to_be_bytes());
    b.extend_from_slice(&[0; 8]);
    for v in [0u32, 3, 7] {
        b.extend_from_slice(&v.to_be_bytes());
    }
    b.extend_from_slice(&[0; 4]);
    b.extend_from_slice(pool);
    b
}

#[test]
fn shift_jis_vendor_duplicates_survive_roundtrip() -> Result<()> {
    let bytes = nec_file();
    let cfg = CodecConfig::default().with_encoding(TextEncoding::ShiftJis);
    let c = Container::parse(&bytes, &cfg)?;
    assert_eq!(c.lines[0].name, "≒");
    assert_eq!(c.serialize()?, bytes);

    // recalculate считает длины по исходным байтам
    let mut same = c.clone();
    same.recalculate()?;
    assert_eq!(same.serialize()?, bytes);

    // extract -> apply без правок: текст тот же, байты тоже
    let text = to8chtx::extract_markup(&c, None);
    let mut applied = c.clone();
    to8chtx::apply_markup(&mut applied, &text)?;
    applied.recalculate()?;
    assert_eq!(applied.serialize()?, bytes);

    // изменённое поле кодируется заново, каноничным кодом
    let mut edited = c.clone();
    edited.lines[0].name = "≒≒".to_string();
    edited.recalculate()?;
    let out = edited.serialize()?;
    assert_eq!(&out[48..53], &[0x81, 0xE0, 0x81, 0xE0, 0x00]);
    assert_eq!(&out[53..57], &[0xED, 0x40, b'x', 0x00]);
    Ok(())
}
