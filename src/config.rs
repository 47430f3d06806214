use clap::Parser;
use lazy_static::lazy_static;
use super::*;

#[derive(Parser, Debug)]
#[command(author,version,about,long_about=None)]
pub struct Args {
    /// Instruction table to read (the built-in x86 table if omitted)
    #[arg(short, long)]
    pub table: Option<String>,

    /// Only keep functions whose name matches this regular expression
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Print the documentation block of each function
    #[arg(short, long)]
    pub docs: bool,

    /// Print constructor source
    #[arg(short, long)]
    pub ctors: bool,

    /// Print validation test source
    #[arg(short, long)]
    pub gen_tests: bool,

    /// Verify catalog coverage and run every validation invocation in-process
    #[arg(short = 'k', long)]
    pub check: bool,

    /// Enable verbose output (on stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

lazy_static! {
    pub static ref ARGS: Args = if cfg!(test) {
        // manually set parameters for running tests
        Args::parse_from(["formgen"])
    } else {
        Args::parse()
    };
}

pub fn init() { verbose_println!("{:?}", *ARGS); }
/// True if any flag asks for generated output instead of the plain listing.
pub fn any_output() -> bool { ARGS.docs || ARGS.ctors || ARGS.gen_tests || ARGS.check }
