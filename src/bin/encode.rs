// Prints the code of every word given on the command line.
// Run with: cargo run --bin encode -- 你好 你好啊
use dict_core::core::char_index::SingleCharIndex;
use dict_core::core::encoder::CodeEncoder;
use dict_core::Config;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();

    let chars = match Config::from_env().and_then(|config| SingleCharIndex::load(&config.single_char_path)) {
        Ok(chars) => chars,
        Err(e) => {
            eprintln!("[ERROR] Could not load the single-character table: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let encoder = CodeEncoder::new(chars);
    for word in std::env::args().skip(1) {
        println!("{} => {}", word, encoder.encode(&word));
    }
    ExitCode::SUCCESS
}
