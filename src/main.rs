use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use imperia::interpreter::{evaluator::core::Interpreter, value::Value};

/// imperia is a small imperative command language with assignment and print
/// statements.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells imperia to treat the input as a file path instead of script
    /// text.
    #[arg(short, long)]
    file: bool,

    /// Script text to execute (or a path with --file). Omit to start the
    /// interactive prompt.
    contents: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut interpreter =
        Interpreter::with_sink(Box::new(|value: &Value| println!("[Output]: {value}")));

    match args.contents {
        Some(contents) => {
            let script = if args.file {
                fs::read_to_string(&contents).unwrap_or_else(|_| {
                    eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                    std::process::exit(1);
                })
            } else {
                contents
            };

            if let Err(e) = interpreter.execute(&script) {
                eprintln!("{e}");
            }
        },

        None => prompt(&mut interpreter),
    }
}

/// The interactive read loop. One interpreter instance lives for the whole
/// session, so variables persist between lines; errors are reported and the
/// loop continues.
fn prompt(interpreter: &mut Interpreter) {
    println!("imperia {}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' to quit.");

    let stdin = io::stdin();
    loop {
        print!(">> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {},
        }

        if line.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        if let Err(e) = interpreter.execute(&line) {
            eprintln!("Error: {e}");
        }
    }
}
