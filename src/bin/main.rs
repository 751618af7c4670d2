use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use dict_core::core::encoder::encoding_gaps;
use dict_core::{Config, DictError, DictionaryService};
use std::io::{self, stdin, stdout, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const REIMPORT_HINT: &str =
    "Clear all custom codes in the input method and re-import the custom dictionary for the change to take effect.";

fn main() -> ExitCode {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut service = match DictionaryService::open(&config) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("[ERROR] Could not load dictionaries: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&mut service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(service: &mut DictionaryService) -> io::Result<()> {
    let mut current = String::new();
    let mut notice = String::new();

    loop {
        print_ui(&current, &notice, service)?;
        notice.clear();

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim_end_matches(&['\r', '\n'][..]);

        match cmd.trim() {
            "exit" => break,
            ":add" => {
                notice = match service.add_word(&current) {
                    Ok(word) => format!("Added {}. {}", word.name(), REIMPORT_HINT),
                    Err(e) => describe_failure(e)?,
                };
            }
            ":del" => {
                notice = match service.delete_by_name(&current) {
                    Ok(word) => format!("Deleted {}. {}", word.name(), REIMPORT_HINT),
                    Err(e) => describe_failure(e)?,
                };
            }
            ":json" => {
                notice = serde_json::to_string(&service.find_existing(current.trim()))
                    .unwrap_or_else(|_| "null".to_string());
            }
            _ => {
                current = cmd.to_string();
            }
        }
    }
    Ok(())
}

/// Turns rule violations into a notice; anything else ends the session.
fn describe_failure(e: DictError) -> io::Result<String> {
    match e {
        DictError::Conflict(existing) => Ok(format!(
            "Operation failed: the word {} is already in the dictionary",
            existing.name()
        )),
        DictError::NotFound(word) => Ok(format!(
            "Operation failed: the word {} is not found in the custom dictionary",
            word.name()
        )),
        DictError::EmptyWord => Ok("Operation failed: type a word first".to_string()),
        DictError::InvalidWord(name) => Ok(format!(
            "Operation failed: {:?} contains a tab or line break",
            name
        )),
        DictError::IndexExhausted { code } => Ok(format!(
            "Operation failed: no index left for code {}",
            code
        )),
        DictError::Io(e) => Err(e),
        other => Err(io::Error::new(io::ErrorKind::InvalidData, other)),
    }
}

fn print_ui(current: &str, notice: &str, service: &DictionaryService) -> io::Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    println!("Custom Dictionary Editor");
    println!("---------------------------------------------------------------");
    println!("Type a word and press [Enter] to see its code.");
    println!("':add' adds it, ':del' deletes it, ':json' dumps it, 'exit' quits.\n");

    let word = current.trim();
    let code = service.encode(word);
    if encoding_gaps(&code).is_empty() {
        println!("Code: {}", code.as_str().bold());
    } else {
        println!("Code: {}", code.as_str().red().bold());
    }

    println!("\nLookup in dictionary:");
    match service.find_existing(word) {
        Some(existing) => println!("  {}", existing),
        None => println!("  {}", "not found".dark_grey()),
    }

    if !notice.is_empty() {
        println!("\n{}", notice.yellow());
    }
    print!("\n> ");
    out.flush()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
