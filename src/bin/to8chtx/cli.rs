use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI для TO8CHTX: детект раскладки, выгрузка/упаковка текста, обмен с хранилищем переводов
#[derive(Parser, Debug)]
#[command(name = "to8chtx", version, about = "TO8CHTX chat-text container tool")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Detect pointer width and language count from the header
    Detect {
        #[arg(long)]
        input: PathBuf,
    },
    /// Print header summary
    Info {
        #[arg(long)]
        input: PathBuf,
        /// ShiftJIS | UTF8 | ASCII (default: CHTX_ENCODING or UTF8)
        #[arg(long)]
        encoding: Option<String>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Extract lines into an editable text file
    ///
    /// Пример:
    ///   to8chtx extract --input chat.bin --output chat.txt --encoding sjis
    Extract {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        encoding: Option<String>,
        /// Replace '@' with a space (display only; the result is not meant to be packed back)
        #[arg(long, default_value_t = false)]
        replace_at: bool,
    },
    /// Apply an edited text file and write a new container
    Pack {
        #[arg(long)]
        input: PathBuf,
        /// Text file produced by `extract`
        #[arg(long)]
        text: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        encoding: Option<String>,
    },
    /// Export name/text rows into a new translation store (SQLite)
    ///
    /// Без --encoding и CHTX_ENCODING используется ShiftJIS; '@' в текстах заменяется пробелом.
    Export {
        #[arg(long)]
        input: PathBuf,
        /// SQLite database to create (replaced atomically)
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        encoding: Option<String>,
        /// Pointer width in bits (32|64); detected from the header if omitted
        #[arg(long)]
        bits: Option<u32>,
        /// Language count; detected from the header if omitted
        #[arg(long)]
        languages: Option<usize>,
    },
    /// Merge translations from the store (Text.english by PointerRef) into a container
    ///
    /// Пример:
    ///   to8chtx merge --input chat.bin --db chat.db --output chat.new.bin
    Merge {
        #[arg(long)]
        input: PathBuf,
        /// SQLite database with table Text(english, PointerRef)
        #[arg(long)]
        db: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        encoding: Option<String>,
        #[arg(long)]
        bits: Option<u32>,
        #[arg(long)]
        languages: Option<usize>,
    },
}
