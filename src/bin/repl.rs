//! A read-eval-print loop over the library's `parse`/`simplify`/
//! `to_infix` pipeline. Each line is parsed, simplified, and
//! printed in infix form; parse errors print on their own line and
//! simplification continues with the next line. Exits on EOF.
//!
//! Passing a single expression as `argv[1]` evaluates it once and exits,
//! for scripting convenience — there is no further flag surface.

use std::io::{self, BufRead, Write};

use oasis_symbolic::{parse, simplify, to_infix};

fn evaluate(line: &str) -> String {
    match parse(line) {
        Ok(expr) => match simplify(&expr) {
            Ok(simplified) => to_infix(&simplified)
                .unwrap_or_else(|err| format!("serialization error: {err}")),
            Err(err) => format!("simplification error: {err}"),
        },
        Err(err) => format!("parse error: {err}"),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        println!("{}", evaluate(&args.join(" ")));
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let result = evaluate(&line);
        let _unused = writeln!(out, "{result}");
        let _unused = out.flush();
    }
}
