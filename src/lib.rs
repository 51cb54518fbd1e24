// Базовые модули
pub mod consts;
pub mod error;
pub mod config;

// Листовой слой: целые с выбранным порядком байт + кодировки строк
pub mod codec;     // src/codec/{mod,cursor,encoding}.rs

// Определение раскладки по заголовку
pub mod layout;

// Модель контейнера (папка с mod.rs)
pub mod container; // src/container/{mod,header,parse,recalc,serialize}.rs

// Текстовый round-trip формат
pub mod markup;    // src/markup/{mod,extract,apply}.rs

// Обмен с хранилищем переводов (pointer reference)
pub mod merge;
pub mod store;     // SQLite (rusqlite)

// Удобные реэкспорты
pub use codec::{Endian, PointerWidth, TextEncoding};
pub use config::CodecConfig;
pub use container::{ChatHeader, ChatLine, Container, PoolField};
pub use error::{ChtxError, Result};
pub use layout::{detect_layout, detect_layout_with, Layout};
pub use markup::{apply_markup, extract_markup};
pub use merge::{apply_pointer_refs, export_rows, ExportEntry, StoreRow};
pub use store::TextStore;
