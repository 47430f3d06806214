//! Validation arguments: example operand expressions for every operand type tag,
//! and their expansion into every combination a form can be invoked with.
use super::inst::{Form, Instruction};
use super::operand::{Mem, Operand};
use super::registers::Register;
use super::*;

use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

/// Example operand expressions per type tag, in the order they are tried.
#[rustfmt::skip]
static BUILTIN: &[(&str, &[&str])] = &[
    // Immediates
    ("1",     &["Operand::Imm(1)"]),
    ("3",     &["Operand::Imm(3)"]),
    ("imm2u", &["Operand::Imm(1)", "Operand::Imm(3)"]),
    ("imm8",  &["Operand::Imm(127)"]),
    ("imm16", &["Operand::Imm(32767)"]),
    ("imm32", &["Operand::Imm(2147483647)"]),
    ("imm64", &["Operand::Imm(9223372036854775807)"]),

    // Registers
    ("al",   &["Operand::Reg(reg::AL)"]),
    ("cl",   &["Operand::Reg(reg::CL)"]),
    ("ax",   &["Operand::Reg(reg::AX)"]),
    ("eax",  &["Operand::Reg(reg::EAX)"]),
    ("rax",  &["Operand::Reg(reg::RAX)"]),
    ("r8",   &["Operand::Reg(reg::CH)", "Operand::Reg(reg::BL)", "Operand::Reg(reg::R13B)"]),
    ("r16",  &["Operand::Reg(reg::CX)", "Operand::Reg(reg::R9W)"]),
    ("r32",  &["Operand::Reg(reg::R10L)"]),
    ("r64",  &["Operand::Reg(reg::R11)"]),
    ("xmm0", &["Operand::Reg(reg::X0)"]),
    ("xmm",  &["Operand::Reg(reg::X7)"]),
    ("ymm",  &["Operand::Reg(reg::Y15)"]),
    ("zmm",  &["Operand::Reg(reg::Z31)"]),
    ("k",    &["Operand::Reg(reg::K7)"]),

    // Memory
    ("m",    &["Operand::Mem(Mem { base: Some(reg::BX), index: Some(reg::CX), scale: 2, ..Mem::default() })"]),
    ("m8",   &["Operand::Mem(Mem { base: Some(reg::BL), index: Some(reg::CH), scale: 1, ..Mem::default() })"]),
    ("m16",  &["Operand::Mem(Mem { base: Some(reg::BX), index: Some(reg::CX), scale: 2, ..Mem::default() })"]),
    ("m32",  &["Operand::Mem(Mem { base: Some(reg::EBX), index: Some(reg::ECX), scale: 4, ..Mem::default() })"]),
    ("m64",  &["Operand::Mem(Mem { base: Some(reg::RBX), index: Some(reg::RCX), scale: 8, ..Mem::default() })"]),
    ("m128", &["Operand::Mem(Mem { base: Some(reg::RBX), index: Some(reg::RCX), scale: 8, ..Mem::default() })"]),
    ("m256", &["Operand::Mem(Mem { base: Some(reg::RBX), index: Some(reg::RCX), scale: 8, ..Mem::default() })"]),
    ("m512", &["Operand::Mem(Mem { base: Some(reg::RBX), index: Some(reg::RCX), scale: 8, ..Mem::default() })"]),

    // Vector memory
    ("vm32x", &["Operand::Mem(Mem { base: Some(reg::R13), index: Some(reg::X4), scale: 1, ..Mem::default() })"]),
    ("vm64x", &["Operand::Mem(Mem { base: Some(reg::R13), index: Some(reg::X8), scale: 1, ..Mem::default() })"]),
    ("vm32y", &["Operand::Mem(Mem { base: Some(reg::R13), index: Some(reg::Y4), scale: 1, ..Mem::default() })"]),
    ("vm64y", &["Operand::Mem(Mem { base: Some(reg::R13), index: Some(reg::Y8), scale: 1, ..Mem::default() })"]),
    ("vm32z", &["Operand::Mem(Mem { base: Some(reg::R13), index: Some(reg::Z4), scale: 1, ..Mem::default() })"]),
    ("vm64z", &["Operand::Mem(Mem { base: Some(reg::R13), index: Some(reg::Z8), scale: 1, ..Mem::default() })"]),

    // Relative
    ("rel8",  &["Operand::Rel(127)"]),
    ("rel32", &["Operand::Rel(2147483647)", "Operand::LabelRef(\"lbl\".to_string())"]),
];

lazy_static! {
    /// The built-in catalog, constructed on first use and never modified.
    pub static ref CATALOG: Catalog = Catalog::builtin();

    static ref RE_IMM: Regex = Regex::new(r"^Operand::Imm\((\d+)\)$").unwrap();
    static ref RE_REL: Regex = Regex::new(r"^Operand::Rel\((-?\d+)\)$").unwrap();
    static ref RE_REG: Regex = Regex::new(r"^Operand::Reg\(reg::([A-Z0-9_]+)\)$").unwrap();
    static ref RE_LABEL: Regex = Regex::new(r#"^Operand::LabelRef\("([^"]*)"\.to_string\(\)\)$"#).unwrap();
    static ref RE_MEM: Regex = Regex::new(
        r"^Operand::Mem\(Mem \{ base: Some\(reg::([A-Z0-9_]+)\), index: Some\(reg::([A-Z0-9_]+)\), scale: (\d+), \.\.Mem::default\(\) \}\)$"
    )
    .unwrap();
}

/// Maps operand type tags to literal example operand expressions.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<String, Vec<String>>,
}

impl Catalog {
    pub fn new() -> Self { Catalog { entries: HashMap::new() } }
    pub fn builtin() -> Self {
        let mut c = Catalog::new();
        for (tag, examples) in BUILTIN {
            c.insert(tag, examples);
        }
        c
    }
    pub fn insert(&mut self, tag: &str, examples: &[&str]) {
        self.entries
            .insert(tag.to_string(), examples.iter().map(|e| e.to_string()).collect());
    }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    /// The examples for `tag`. A tag without (non-empty) examples is a configuration defect.
    pub fn lookup(&self, tag: &str) -> Result<&[String], Error> {
        match self.entries.get(tag) {
            Some(examples) if !examples.is_empty() => Ok(examples.as_slice()),
            _ => Err(invariant_err!(
                ErrorKind::MissingCatalogEntry,
                None,
                "missing operands for type {}",
                tag
            )),
        }
    }
    /// Confirm every type tag used in `instructions` has examples.
    pub fn verify(&self, instructions: &[Instruction]) -> Result<(), Error> {
        for i in instructions {
            for form in &i.forms {
                for op in &form.operands {
                    self.lookup(&op.type_tag).map_err(|e| e.with_ctx(&i.opcode))?;
                }
            }
        }
        Ok(())
    }
    /// (tag, examples) pairs sorted by tag.
    pub fn entries(&self) -> Vec<(&str, &[String])> {
        let mut v: Vec<(&str, &[String])> = self.entries.iter().map(|(t, e)| (t.as_str(), e.as_slice())).collect();
        v.sort_by_key(|(t, _)| *t);
        v
    }
}

/// Every combination of example arguments for `form`, one example per operand position.
pub fn valid_form_args(form: &Form, catalog: &Catalog) -> Result<Vec<Vec<String>>, Error> {
    let args = form
        .operands
        .iter()
        .map(|op| catalog.lookup(&op.type_tag).map(|e| e.to_vec()))
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(cross(&args))
}

/// Cartesian product of `lists`; the first list varies slowest.
/// The product of no lists is a single empty combination.
pub fn cross<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    if lists.is_empty() {
        return vec![Vec::new()];
    }
    lists.iter().map(|l| l.iter().cloned()).multi_cartesian_product().collect()
}

/// Turn a catalog expression back into the operand it denotes.
pub fn parse_example(literal: &str) -> Result<Operand, Error> {
    let unknown = || {
        invariant_err!(
            ErrorKind::UnknownOperandVariant,
            Some(literal),
            "not an operand expression"
        )
    };
    if let Some(c) = RE_IMM.captures(literal) {
        return c[1].parse::<u64>().map(Operand::Imm).map_err(|_| unknown());
    }
    if let Some(c) = RE_REL.captures(literal) {
        return c[1].parse::<i32>().map(Operand::Rel).map_err(|_| unknown());
    }
    if let Some(c) = RE_REG.captures(literal) {
        return register(&c[1]).map(Operand::Reg);
    }
    if let Some(c) = RE_LABEL.captures(literal) {
        return Ok(Operand::LabelRef(c[1].to_string()));
    }
    if let Some(c) = RE_MEM.captures(literal) {
        return Ok(Operand::Mem(Mem {
            base: Some(register(&c[1])?),
            index: Some(register(&c[2])?),
            scale: c[3].parse::<u8>().map_err(|_| unknown())?,
            ..Mem::default()
        }));
    }
    Err(unknown())
}

fn register(ident: &str) -> Result<Register, Error> {
    Register::from_ident(ident).ok_or_else(|| general_err!(format!("unknown register reg::{}", ident)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::*;

    #[test]
    fn cross_product() {
        let lists = vec![vec![1, 2], vec![3], vec![4, 5, 6]];
        let c = cross(&lists);
        assert_eq!(c.len(), 6);
        assert_eq!(c[0], vec![1, 3, 4]);
        assert_eq!(c[1], vec![1, 3, 5]);
        assert_eq!(c[3], vec![2, 3, 4]);
        assert_eq!(c[5], vec![2, 3, 6]);
        assert_eq!(cross::<u8>(&[]), vec![Vec::<u8>::new()]);
        assert!(cross(&[vec![1], Vec::new()]).is_empty());
    }

    #[test]
    fn combinations_follow_catalog_order() -> Result<(), Error> {
        let form = Form::new(&["r8", "imm2u", "r16"]);
        let args = valid_form_args(&form, &CATALOG)?;
        assert_eq!(args.len(), 3 * 2 * 2);
        assert_eq!(
            args[0],
            vec!["Operand::Reg(reg::CH)", "Operand::Imm(1)", "Operand::Reg(reg::CX)"]
        );
        assert_eq!(
            args[11],
            vec!["Operand::Reg(reg::R13B)", "Operand::Imm(3)", "Operand::Reg(reg::R9W)"]
        );
        assert_eq!(valid_form_args(&Form::new(&[]), &CATALOG)?, vec![Vec::<String>::new()]);
        Ok(())
    }

    #[test]
    fn missing_tags_are_fatal() {
        let err = valid_form_args(&Form::new(&["r64", "m1024"]), &CATALOG).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingCatalogEntry);
        let mut c = Catalog::new();
        c.insert("r64", &[]);
        assert_eq!(c.lookup("r64").unwrap_err().kind, ErrorKind::MissingCatalogEntry);

        let insts = vec![Instruction::new("FOO", "", vec![Form::new(&["xmm", "tmm"])])];
        let err = CATALOG.verify(&insts).unwrap_err();
        assert_eq!(err.ctx.as_deref(), Some("FOO"));
    }

    #[test]
    fn parse_examples() -> Result<(), Error> {
        assert_eq!(parse_example("Operand::Imm(127)")?, Operand::Imm(127));
        assert_eq!(parse_example("Operand::Rel(2147483647)")?, Operand::Rel(i32::MAX));
        assert_eq!(parse_example("Operand::Reg(reg::R13B)")?, Operand::Reg(R13B));
        assert_eq!(
            parse_example("Operand::LabelRef(\"lbl\".to_string())")?,
            Operand::LabelRef("lbl".to_string())
        );
        let m = parse_example(
            "Operand::Mem(Mem { base: Some(reg::R13), index: Some(reg::Z4), scale: 1, ..Mem::default() })",
        )?;
        assert_eq!(m.asm(), "(R13)(Z4*1)");
        assert_eq!(m.registers(), vec![R13, Z4]);
        assert_eq!(
            parse_example("Operand::Float(1.5)").unwrap_err().kind,
            ErrorKind::UnknownOperandVariant
        );
        assert_eq!(
            parse_example("Operand::Rel(9999999999)").unwrap_err().kind,
            ErrorKind::UnknownOperandVariant
        );
        assert_eq!(parse_example("Operand::Reg(reg::R99)").unwrap_err().kind, ErrorKind::General);
        Ok(())
    }

    #[test]
    fn builtin_examples_fit_their_tags() -> Result<(), Error> {
        assert!(!CATALOG.is_empty());
        for (tag, examples) in CATALOG.entries() {
            for e in examples {
                let op = parse_example(e)?;
                assert!(checks::satisfies(&op, tag), "{} does not satisfy {}", e, tag);
            }
        }
        Ok(())
    }

    #[test]
    fn builtin_table_is_covered() -> Result<(), Error> {
        let insts = table::builtin()?;
        CATALOG.verify(&insts)
    }
}
