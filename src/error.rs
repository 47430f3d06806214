use std::{convert::From, fmt};

/// Error type shared by every stage of the generator.
pub struct Error {
    pub kind: ErrorKind,
    /// the instruction, function or form the error relates to (if any)
    pub ctx: Option<String>,
    pub msg: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// malformed line in an instruction table
    Syntax,
    /// underlying io error
    IO,
    /// an operand type tag has no entry in the validation-argument catalog
    MissingCatalogEntry,
    /// example literal that is not any known operand variant
    UnknownOperandVariant,
    /// forms of one function disagree on arity (or there are no forms)
    ArityMismatch,
    /// example operand does not satisfy the type tag at its position
    Validation,
    /// conflicting register allocation
    Allocation,
    /// catch-all for other errors
    General,
}

impl Error {
    pub fn new(kind: ErrorKind, ctx: Option<&str>, message: &str) -> Error {
        Error {
            kind,
            ctx: ctx.map(String::from),
            msg: String::from(message),
        }
    }
    pub fn with_ctx(mut self, ctx: &str) -> Error {
        self.ctx = Some(ctx.to_string());
        self
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self { Error::new(ErrorKind::IO, None, e.to_string().as_str()) }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {:?}: {}", red!("formgen::Error"), self.kind, self.msg)
    }
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.msg)?;
        if let Some(ctx) = self.ctx.as_ref() {
            write!(f, "\nContext: {}", ctx)?;
        }
        Ok(())
    }
}
impl std::error::Error for Error {}
