//! Machine operands as they appear in assembled instructions.
//!
//! The set of operand kinds is closed: every consumer matches on [Operand]
//! exhaustively, so there is no "unknown operand" case to handle at runtime.
#![allow(dead_code)]
use super::registers::{Allocation, Register};
use super::*;

/// A named memory location. Static symbols are file-local and render with a `<>` suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub name: String,
    pub is_static: bool,
}
impl Symbol {
    pub fn new(name: &str, is_static: bool) -> Self {
        Symbol {
            name: name.to_string(),
            is_static,
        }
    }
}
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_static {
            write!(f, "<>")?;
        }
        Ok(())
    }
}

/// Memory reference: `symbol+disp(base)(index*scale)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Mem {
    pub symbol: Symbol,
    pub disp: i32,
    pub base: Option<Register>,
    pub index: Option<Register>,
    /// 0 means no index/scale in use
    pub scale: u8,
}
impl Mem {
    /// Address of a named function parameter: an offset from the frame pointer pseudo register.
    pub fn param_addr(name: &str, offset: i32) -> Mem {
        Mem {
            symbol: Symbol::new(name, false),
            disp: offset,
            base: Some(registers::FRAME_POINTER),
            ..Mem::default()
        }
    }
    pub fn asm(&self) -> String {
        let mut a = self.symbol.to_string();
        if self.disp != 0 {
            if a.is_empty() {
                a += &format!("{}", self.disp);
            } else {
                a += &format!("{:+}", self.disp);
            }
        }
        if let Some(base) = self.base {
            a += &format!("({})", base.asm());
        }
        if let Some(index) = self.index {
            if self.scale != 0 {
                a += &format!("({}*{})", index.asm(), self.scale);
            }
        }
        a
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Reg(Register),
    Mem(Mem),
    Imm(u64),
    /// offset relative to the instruction pointer
    Rel(i32),
    /// reference to a code label that has not been resolved yet
    LabelRef(String),
}

impl Operand {
    /// Assembly text for this operand.
    pub fn asm(&self) -> String {
        match self {
            Operand::Reg(r) => r.asm(),
            Operand::Mem(m) => m.asm(),
            Operand::Imm(i) => format!("${:#x}", i),
            Operand::Rel(r) => format!(".{:+}", r),
            Operand::LabelRef(l) => l.clone(),
        }
    }

    /// All registers this operand refers to. For memory operands the base comes before the index.
    pub fn registers(&self) -> Vec<Register> {
        match self {
            Operand::Reg(r) => vec![*r],
            Operand::Mem(m) => m.base.iter().chain(m.index.iter()).copied().collect(),
            Operand::Imm(_) | Operand::Rel(_) | Operand::LabelRef(_) => Vec::new(),
        }
    }

    /// Copy of this operand with allocated registers substituted.
    /// Registers missing from the allocation are left alone.
    pub fn apply_allocation(&self, a: &Allocation) -> Operand {
        match self {
            Operand::Reg(r) => Operand::Reg(a.lookup_default(*r)),
            Operand::Mem(m) => Operand::Mem(Mem {
                base: m.base.map(|r| a.lookup_default(r)),
                index: m.index.map(|r| a.lookup_default(r)),
                ..m.clone()
            }),
            other => other.clone(),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.asm()) }
}
