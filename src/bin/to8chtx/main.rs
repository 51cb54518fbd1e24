use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_detect;
mod cmd_info;
mod cmd_extract;
mod cmd_pack;
// обмен с хранилищем переводов
mod cmd_export;
mod cmd_merge;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug ./to8chtx detect --input chat.bin
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        // Логируем ошибку и выходим с кодом 1.
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Detect { input } =>
            cmd_detect::exec(input),

        cli::Cmd::Info { input, encoding, json } =>
            cmd_info::exec(input, encoding, json),

        cli::Cmd::Extract { input, output, encoding, replace_at } =>
            cmd_extract::exec(input, output, encoding, replace_at),

        cli::Cmd::Pack { input, text, output, encoding } =>
            cmd_pack::exec(input, text, output, encoding),

        cli::Cmd::Export { input, output, encoding, bits, languages } =>
            cmd_export::exec(input, output, encoding, bits, languages),

        cli::Cmd::Merge { input, db, output, encoding, bits, languages } =>
            cmd_merge::exec(input, db, output, encoding, bits, languages),
    }
}
