//! Constructor synthesis: one [Function] per instruction and suffix combination,
//! each with derived parameter names and a documentation block.
use super::doc::Table;
use super::index;
use super::inst::{self, Form, Instruction};
use super::*;

use std::collections::BTreeSet;

/// Parameters of a synthesized constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signature {
    /// no operands at all
    Niladic,
    /// one named parameter per operand position
    Args(Vec<String>),
    /// forms of differing arity; operands are passed as one slice
    Variadic { name: String },
}

impl Signature {
    /// The plain parameter names.
    pub fn names(&self) -> Vec<String> {
        match self {
            Signature::Niladic => Vec::new(),
            Signature::Args(names) => names.clone(),
            Signature::Variadic { name } => vec![name.clone()],
        }
    }
    /// Rust parameter list, e.g. `mx: Operand, r: Operand` or `ops: &[Operand]`.
    pub fn parameter_list(&self) -> String {
        match self {
            Signature::Niladic => String::new(),
            Signature::Args(names) => names
                .iter()
                .map(|n| format!("{}: Operand", ident(n)))
                .collect::<Vec<_>>()
                .join(", "),
            Signature::Variadic { name } => format!("{}: &[Operand]", ident(name)),
        }
    }
    /// The parameters as call arguments.
    pub fn arguments(&self) -> String {
        match self {
            Signature::Niladic => String::new(),
            Signature::Args(names) => names.iter().map(|n| ident(n)).collect::<Vec<_>>().join(", "),
            Signature::Variadic { name } => ident(name),
        }
    }
    /// Expression for the i-th operand, if there is one.
    pub fn parameter_name(&self, i: usize) -> Option<String> {
        match self {
            Signature::Niladic => None,
            Signature::Args(names) => names.get(i).map(|n| ident(n)),
            Signature::Variadic { name } => Some(format!("{}[{}]", ident(name), i)),
        }
    }
    /// Expression collecting all operands into a `Vec<Operand>`.
    pub fn parameter_slice(&self) -> String {
        match self {
            Signature::Niladic => "vec![]".to_string(),
            Signature::Args(_) => format!("vec![{}]", self.arguments()),
            Signature::Variadic { name } => format!("{}.to_vec()", ident(name)),
        }
    }
    /// Expression for the number of operands.
    pub fn length(&self) -> String {
        match self {
            Signature::Niladic => "0".to_string(),
            Signature::Args(names) => names.len().to_string(),
            Signature::Variadic { name } => format!("{}.len()", ident(name)),
        }
    }
}

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "do", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "priv", "pub",
    "ref", "return", "static", "struct", "super", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// A usable Rust identifier for a derived parameter name.
pub fn ident(name: &str) -> String {
    match name.chars().next() {
        None => "_0".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{}", name),
        _ if KEYWORDS.contains(&name) => format!("r#{}", name),
        _ => name.to_string(),
    }
}

/// A constructor for one instruction with one suffix combination.
#[derive(Debug, Clone)]
pub struct Function<'a> {
    pub instruction: &'a Instruction,
    pub suffixes: Vec<String>,
    pub forms: Vec<&'a Form>,
}

impl<'a> Function<'a> {
    /// Function name: opcode and suffixes joined by `_`.
    pub fn name(&self) -> String { self.opcode_suffix("_") }
    /// Full assembler opcode including suffixes, joined by `.`.
    pub fn opcode(&self) -> String { self.opcode_suffix(".") }
    fn opcode_suffix(&self, sep: &str) -> String {
        let mut n = self.instruction.opcode.clone();
        for suffix in &self.suffixes {
            n.push_str(sep);
            n.push_str(suffix);
        }
        n
    }

    pub fn arities(&self) -> Vec<usize> { inst::arities(&self.forms) }
    pub fn arity(&self) -> Result<usize, Error> { inst::arity(&self.forms).map_err(|e| e.with_ctx(&self.name())) }
    /// True when the forms take differing operand counts.
    pub fn is_variadic(&self) -> bool { self.arities().len() > 1 }
    pub fn is_niladic(&self) -> bool { self.arities() == [0] }

    /// Derive the constructor signature from the forms.
    ///
    /// The name at each position is the sorted set of lowercase first letters of the
    /// operand type tags found there (e.g. `m64` and `r64` give `mr`). A name already
    /// used at an earlier position gets a counter appended: `r`, `r1`, `r2`.
    pub fn signature(&self) -> Result<Signature, Error> {
        if self.is_variadic() {
            return Ok(Signature::Variadic {
                name: "ops".to_string(),
            });
        }
        if self.is_niladic() {
            return Ok(Signature::Niladic);
        }
        let n = self.arity()?;
        let mut ops = Vec::with_capacity(n);
        let mut count: HashMap<String, usize> = HashMap::new();
        for j in 0..n {
            let letters: BTreeSet<char> = self
                .forms
                .iter()
                .filter_map(|form| form.operands[j].type_tag.chars().next())
                .filter(char::is_ascii_lowercase)
                .collect();
            let mut name: String = letters.into_iter().collect();
            let seen = count.entry(name.clone()).or_insert(0);
            if *seen > 0 {
                name.push_str(&seen.to_string());
            }
            *seen += 1;
            ops.push(name);
        }
        Ok(Signature::Args(ops))
    }

    /// Documentation comment as a list of lines.
    pub fn doc(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}: {}.", self.name(), self.instruction.summary),
            String::new(),
            "Forms:".to_string(),
            String::new(),
        ];
        let opcode = self.opcode();
        let mut table = Table::new(1);
        for form in &self.forms {
            let mut row = vec![opcode.clone()];
            let sig = form.signature();
            if sig.is_empty() {
                row.push(String::new());
            } else {
                row.extend(sig);
            }
            table.add_row(row);
        }
        let rendered = table.render();
        for line in rendered.trim().split('\n') {
            lines.push(format!("\t{}", line));
        }
        lines
    }
}

/// All functions for one instruction, sorted by name.
pub fn instruction_functions(i: &Instruction) -> Vec<Function<'_>> {
    let mut fns: Vec<Function> = index::group(&i.forms)
        .into_iter()
        .map(|g| Function {
            instruction: i,
            suffixes: g.suffixes,
            forms: g.forms,
        })
        .collect();
    sort_functions(&mut fns);
    fns
}

/// All functions for a list of instructions, sorted by name.
pub fn instructions_functions(is: &[Instruction]) -> Vec<Function<'_>> {
    let mut all: Vec<Function> = is.iter().flat_map(instruction_functions).collect();
    sort_functions(&mut all);
    all
}

pub fn sort_functions(fns: &mut [Function]) { fns.sort_by_key(|f| f.name()); }
