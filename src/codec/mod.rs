//! codec — листовой слой: целые фиксированной ширины и кодировки строк пула.

pub mod cursor;
pub mod encoding;

pub use cursor::{ByteReader, ByteWriter, Endian, PointerWidth};
pub use encoding::TextEncoding;
