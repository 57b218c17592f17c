use std::{
    fs,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use numera::State;

/// numera is an interactive interpreter for arithmetic expressions with
/// variables and user-declared functions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Evaluate the inputs in a file, one per line, then exit.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// A single input to evaluate instead of starting the prompt.
    input: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut state = State::new();

    if let Some(path) = args.file {
        let script = fs::read_to_string(&path).unwrap_or_else(|_| {
            eprintln!(
                "Failed to read the input file '{}'. Perhaps this file does not exist?",
                path.display()
            );
            std::process::exit(1);
        });
        return run_script(&mut state, &script);
    }

    if let Some(input) = args.input {
        return match state.eval_line(&input) {
            Ok(outcome) => {
                println!("{outcome}");
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            },
        };
    }

    repl(&mut state)
}

/// Evaluates a script line by line, stopping at the first error.
fn run_script(state: &mut State, script: &str) -> ExitCode {
    for line in script.lines() {
        if line.trim().is_empty() {
            continue;
        }
        match state.eval_line(line) {
            Ok(outcome) => println!("{outcome}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            },
        }
    }
    ExitCode::SUCCESS
}

/// The interactive prompt. Errors are printed and the session continues.
fn repl(state: &mut State) -> ExitCode {
    let stdin = io::stdin();
    prompt();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        match line.trim() {
            "" => {},
            "exit" | "quit" | "q" | "bye" => break,
            input => {
                let started = Instant::now();
                match state.eval_line(input) {
                    Ok(outcome) => println!("<< ({:.1?}) {outcome}", started.elapsed()),
                    Err(e) => println!("error: {e}"),
                }
            },
        }
        prompt();
    }
    ExitCode::SUCCESS
}

fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}
