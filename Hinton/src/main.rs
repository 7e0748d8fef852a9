use std::io::Write;
use std::process::ExitCode;
use std::{fs, io};

use virtual_machine::{InterpretResult, VM};

/// A bytecode interpreter for a small Lox-family scripting language.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
  /// Path to a source file. When omitted, starts an interactive REPL.
  path: Option<String>,
}

fn main() -> ExitCode {
  let args = <Args as clap::Parser>::parse();

  match args.path {
    Some(path) => run_file(&path),
    None => run_repl(),
  }
}

fn run_file(path: &str) -> ExitCode {
  let source = match fs::read(path) {
    Ok(bytes) => bytes,
    Err(error) => {
      eprintln!("Could not read '{}': {}", path, error);
      return ExitCode::from(74);
    }
  };

  let mut vm = VM::new();
  match vm.interpret(&source) {
    InterpretResult::Ok => ExitCode::SUCCESS,
    InterpretResult::CompileError => ExitCode::from(65),
    InterpretResult::RuntimeError => ExitCode::from(70),
  }
}

/// Reads one line at a time from stdin and interprets it on a VM that
/// persists across lines, so declarations and interned strings from
/// earlier input remain visible. Exits cleanly on EOF (Ctrl-D).
fn run_repl() -> ExitCode {
  let mut vm = VM::new();
  let mut line = String::new();
  let stdin = io::stdin();

  loop {
    print!("> ");
    if io::stdout().flush().is_err() {
      return ExitCode::from(74);
    }

    line.clear();
    match stdin.read_line(&mut line) {
      Ok(0) => return ExitCode::SUCCESS,
      Ok(_) => {
        vm.interpret(line.as_bytes());
      }
      Err(error) => {
        eprintln!("Error reading from stdin: {}", error);
        return ExitCode::from(74);
      }
    }
  }
}
