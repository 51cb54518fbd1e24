//! Centralized codec configuration for TO8CHTX containers.
//!
//! Goals:
//! - Single place to collect the knobs parse/serialize need instead of threading five arguments.
//! - CodecConfig::from_env() reads CHTX_* env vars; CLI flags override via fluent setters.
//! - with_layout() plugs a detected Layout in, so "detect then parse" stays a one-liner.
//!
//! Defaults match the shipped game files:
//! - byte_order = big-endian
//! - encoding = UTF8
//! - pointer_width = B32, language_count = 2
//! - replace_placeholder = false (raw round-trip; '@' kept as is)

use std::fmt;

use log::warn;

use crate::codec::{Endian, PointerWidth, TextEncoding};
use crate::layout::Layout;

/// Settings for parsing/serializing one container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Byte order of every multi-byte header/table field.
    /// Env: CHTX_BYTE_ORDER = be|le (default be)
    pub byte_order: Endian,

    /// Encoding of pool strings.
    /// Env: CHTX_ENCODING = ShiftJIS|SJIS|UTF8|UTF-8|ASCII (default UTF8)
    pub encoding: TextEncoding,

    /// Width of every pointer in the table.
    /// Env: CHTX_BITS = 32|64 (default 32)
    pub pointer_width: PointerWidth,

    /// Text slots per line.
    /// Env: CHTX_LANGUAGES (default 2)
    pub language_count: usize,

    /// Replace '@' with ' ' in decoded text slots (display-oriented dumps only).
    /// Env: CHTX_REPLACE_AT = 0|1|true|false (default false)
    pub replace_placeholder: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            byte_order: Endian::Big,
            encoding: TextEncoding::Utf8,
            pointer_width: PointerWidth::B32,
            language_count: 2,
            replace_placeholder: false,
        }
    }
}

fn env_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

impl CodecConfig {
    /// Load configuration from environment variables; malformed values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("CHTX_BYTE_ORDER") {
            match Endian::from_name(&v) {
                Some(e) => cfg.byte_order = e,
                None => warn!("CHTX_BYTE_ORDER: unknown byte order '{}', keeping {}", v, cfg.byte_order),
            }
        }

        if let Ok(v) = std::env::var("CHTX_ENCODING") {
            match TextEncoding::from_name(&v) {
                Ok(e) => cfg.encoding = e,
                Err(e) => warn!("CHTX_ENCODING: {}", e),
            }
        }

        if let Ok(v) = std::env::var("CHTX_BITS") {
            match v.trim().parse::<u32>().ok().and_then(PointerWidth::from_bits) {
                Some(w) => cfg.pointer_width = w,
                None => warn!("CHTX_BITS: expected 32 or 64, got '{}'", v),
            }
        }

        if let Ok(v) = std::env::var("CHTX_LANGUAGES") {
            match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => cfg.language_count = n,
                _ => warn!("CHTX_LANGUAGES: expected a positive integer, got '{}'", v),
            }
        }

        if let Ok(v) = std::env::var("CHTX_REPLACE_AT") {
            cfg.replace_placeholder = env_flag(&v);
        }

        cfg
    }

    /// Fluent setters (builder-style) to override specific fields.

    pub fn with_byte_order(mut self, e: Endian) -> Self {
        self.byte_order = e;
        self
    }

    pub fn with_encoding(mut self, enc: TextEncoding) -> Self {
        self.encoding = enc;
        self
    }

    pub fn with_pointer_width(mut self, w: PointerWidth) -> Self {
        self.pointer_width = w;
        self
    }

    pub fn with_language_count(mut self, n: usize) -> Self {
        self.language_count = n;
        self
    }

    pub fn with_replace_placeholder(mut self, on: bool) -> Self {
        self.replace_placeholder = on;
        self
    }

    /// Take pointer width and language count from a detected layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.pointer_width = layout.pointer_width;
        self.language_count = layout.language_count;
        self
    }

    /// Entry size implied by this configuration.
    pub fn entry_size(&self) -> usize {
        4 + (self.language_count + 1) * self.pointer_width.bytes()
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> Self {
        self
    }
}

impl fmt::Display for CodecConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CodecConfig {{ \
             byte_order: {}, \
             encoding: {}, \
             pointer_width: {}, \
             language_count: {}, \
             replace_placeholder: {} \
             }}",
            self.byte_order,
            self.encoding,
            self.pointer_width,
            self.language_count,
            self.replace_placeholder,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_setters() {
        let cfg = CodecConfig::default();
        assert_eq!(cfg.byte_order, Endian::Big);
        assert_eq!(cfg.entry_size(), 16);

        let cfg = cfg
            .with_encoding(TextEncoding::ShiftJis)
            .with_layout(Layout {
                pointer_width: PointerWidth::B64,
                language_count: 3,
                entry_size: 36,
            })
            .with_replace_placeholder(true)
            .build();
        assert_eq!(cfg.encoding, TextEncoding::ShiftJis);
        assert_eq!(cfg.pointer_width, PointerWidth::B64);
        assert_eq!(cfg.language_count, 3);
        assert_eq!(cfg.entry_size(), 36);
        assert!(cfg.replace_placeholder);

        let s = cfg.to_string();
        assert!(s.contains("ShiftJIS") && s.contains("B64"));
    }

    #[test]
    fn env_flag_values() {
        assert!(env_flag("1"));
        assert!(env_flag(" Yes "));
        assert!(!env_flag("0"));
        assert!(!env_flag("off"));
    }
}
