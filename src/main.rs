//! # An instruction-form constructor synthesizer.
//!
//! Reads a table of machine instructions and the operand forms each one accepts,
//! then synthesizes one constructor per instruction and suffix combination:
//! parameter names, a documentation block, and validation invocations built
//! from a catalog of example operands.
//!
//! ## Getting Started
//! To list the synthesized constructors of the built-in table:
//! ```
//! cargo run
//! ```
//! To print constructor source for a subset, or to check every form in-process:
//! ```
//! formgen --ctors --filter '^VPADDD'
//! formgen --check -t /path/to/table.tbl
//! ```
//! ## Options
//! Help for command line options is available using -h or --help.
#[macro_use]
mod macros;
mod catalog;
mod checks;
mod config;
mod doc;
mod error;
mod function;
mod gen;
mod index;
mod inst;
mod operand;
mod registers;
mod table;
use function::Function;
use inst::Instruction;
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::result::Result;
use std::{fmt, io};
pub(crate) use crate::error::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::init();
    // process does all the work
    if let Err(e) = process() {
        eprintln!("{}", e);
        return Err(Box::new(e));
    }
    Ok(())
}

/// Load the instruction table named on the command line, or the built-in one.
fn load_table() -> Result<Vec<Instruction>, Error> {
    match config::ARGS.table.as_deref() {
        Some(path) => {
            info!("Reading instruction table {}", path);
            table::load_from_file(Path::new(path))
        }
        None => table::builtin(),
    }
}

/// Keep only the functions whose name matches `pattern`.
fn filter<'a>(fns: Vec<Function<'a>>, pattern: Option<&str>) -> Result<Vec<Function<'a>>, Error> {
    let pattern = match pattern {
        Some(p) => p,
        None => return Ok(fns),
    };
    let re = Regex::new(pattern).map_err(|e| general_err!(e).with_ctx(pattern))?;
    Ok(fns.into_iter().filter(|f| re.is_match(&f.name())).collect())
}

/// process drives the top level functionality (load, synthesize, emit or check) of the app
fn process() -> Result<(), Error> {
    let instructions = load_table()?;
    let fns = function::instructions_functions(&instructions);
    let total = fns.len();
    let fns = filter(fns, config::ARGS.filter.as_deref())?;
    verbose_println!("{} instructions, {} of {} functions selected", instructions.len(), fns.len(), total);
    if fns.is_empty() {
        warn!("no functions selected");
    }

    let out = io::stdout();
    if config::ARGS.docs {
        emit(&out, &gen::docs(&fns))?;
    }
    if config::ARGS.ctors {
        emit(&out, &gen::ctors(&fns)?)?;
    }
    if config::ARGS.gen_tests {
        emit(&out, &gen::ctors_test(&fns, &catalog::CATALOG)?)?;
    }
    if config::ARGS.check {
        verbose_println!("checking against {} catalog entries", catalog::CATALOG.len());
        catalog::CATALOG.verify(&instructions)?;
        let report = gen::check(&fns, &catalog::CATALOG)?;
        info!("Checked {}", report);
    }
    if !config::any_output() {
        emit(&out, &gen::listing(&fns)?)?;
    }
    Ok(())
}

fn emit(out: &io::Stdout, text: &str) -> Result<(), Error> {
    use std::io::Write;
    let mut lock = out.lock();
    lock.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        lock.write_all(b"\n")?;
    }
    Ok(())
}
