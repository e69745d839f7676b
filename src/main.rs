use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use lispp::config::{HISTORY_FILE, OUTPUT_PREFIX, PROMPT, WELCOME_BANNER};
use lispp::highlight::LispHelper;
use lispp::interp::{InputBuffer, Interpreter};

/// Minimalist Scheme-flavored Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "lispp")]
#[command(version)]
#[command(about = "A minimalist Scheme-flavored Lisp interpreter")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts the REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    match args.script {
        Some(script) => run_script(&script),
        None => repl(),
    }
}

/// Evaluates every expression in a script file, stopping at the first
/// error.
fn run_script(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(path)
        .map_err(|err| format!("cannot read script file {}: {}", path.display(), err))?;
    let mut interp = Interpreter::new(BufReader::new(file), io::stdout());
    while interp.run()? {}
    Ok(())
}

/// Interactive loop: one line per prompt is appended to the input
/// buffer and one expression is evaluated. Errors are printed with the
/// same prefix as values and the session continues; the global scope
/// persists for the whole session.
fn repl() -> Result<(), Box<dyn std::error::Error>> {
    let input = InputBuffer::new();
    let mut interp = Interpreter::new(input.clone(), io::stdout());

    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<LispHelper, DefaultHistory> = Editor::with_config(config)
        .map_err(|err| format!("failed to initialize REPL: {err}"))?;
    rl.set_helper(Some(LispHelper));
    let _ = rl.load_history(HISTORY_FILE);

    println!("{WELCOME_BANNER}");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                input.push_line(&line);
                if let Err(err) = interp.run() {
                    println!("{OUTPUT_PREFIX}{err}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);

    Ok(())
}
