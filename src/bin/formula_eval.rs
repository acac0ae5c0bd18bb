use std::error::Error;
use std::io::{self, BufRead, Write};

use byte_formula::{Formula, WINDOW_LEN};

const USAGE: &str = "usage: formula_eval <float|int> [hex byte]...";

#[derive(Copy, Clone)]
enum Mode {
    Float,
    Int,
}

fn parse_bytes(args: impl Iterator<Item = String>) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut bytes = Vec::with_capacity(WINDOW_LEN);
    for arg in args {
        let digits = arg.trim_start_matches("0x");
        bytes.push(u8::from_str_radix(digits, 16)?);
    }
    Ok(bytes)
}

fn eval_main_loop(mode: Mode, bytes: &[u8]) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let formula = Formula::new(&line);
        // integer formulas read the same bytes as command bytes, at bit position 0
        match mode {
            Mode::Float => match formula.eval_float(bytes, 0.0) {
                Ok(value) => writeln!(stdout, "{}", value)?,
                Err(err) => writeln!(stdout, "error: {}", err)?,
            },
            Mode::Int => match formula.eval_int(bytes, 0, bytes) {
                Ok(value) => writeln!(stdout, "{} ({:#x})", value, value)?,
                Err(err) => writeln!(stdout, "error: {}", err)?,
            },
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args();
    args.next(); // Skip program name
    let mode = match args.next().as_deref() {
        Some("float") => Mode::Float,
        Some("int") => Mode::Int,
        _ => return Err(USAGE.into()),
    };
    let bytes = parse_bytes(args)?;
    eval_main_loop(mode, &bytes)
}
