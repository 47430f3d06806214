//! Source generators for synthesized constructors and their validation tests,
//! plus an in-process run of every validation invocation.
use super::catalog::{self, Catalog};
use super::function::{ident, Function, Signature};
use super::*;

use std::fmt::Write;

/// Header placed at the top of every generated file.
const GENERATED_WARNING: &str = "// Code generated by formgen. DO NOT EDIT.";

/// Constructor source: one documented `pub fn` per function.
pub fn ctors(fns: &[Function]) -> Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "{}\n", GENERATED_WARNING).map_err(fmt_err)?;
    writeln!(out, "use crate::operand::Operand;").map_err(fmt_err)?;
    writeln!(out, "use crate::inst::{{build, Instruction}};").map_err(fmt_err)?;
    writeln!(out, "use crate::Error;\n").map_err(fmt_err)?;
    for f in fns {
        let sig = f.signature()?;
        for line in f.doc() {
            if line.is_empty() {
                writeln!(out, "///").map_err(fmt_err)?;
            } else {
                writeln!(out, "/// {}", line).map_err(fmt_err)?;
            }
        }
        writeln!(out, "#[allow(non_snake_case)]").map_err(fmt_err)?;
        writeln!(
            out,
            "pub fn {}({}) -> Result<Instruction, Error> {{",
            f.name(),
            sig.parameter_list()
        )
        .map_err(fmt_err)?;
        writeln!(out, "    build(\"{}\", {})", f.opcode(), sig.parameter_slice()).map_err(fmt_err)?;
        writeln!(out, "}}\n").map_err(fmt_err)?;
    }
    Ok(out)
}

/// Validation test source: every form of every function invoked with every example combination.
pub fn ctors_test(fns: &[Function], catalog: &Catalog) -> Result<String, Error> {
    let mut out = String::new();
    writeln!(out, "{}\n", GENERATED_WARNING).map_err(fmt_err)?;
    writeln!(out, "use super::*;").map_err(fmt_err)?;
    writeln!(out, "use crate::operand::{{Mem, Operand}};").map_err(fmt_err)?;
    writeln!(out, "use crate::registers as reg;\n").map_err(fmt_err)?;
    for f in fns {
        let sig = f.signature()?;
        writeln!(out, "#[test]").map_err(fmt_err)?;
        writeln!(out, "#[allow(non_snake_case)]").map_err(fmt_err)?;
        writeln!(out, "fn {}_valid_forms() {{", f.name()).map_err(fmt_err)?;
        for form in &f.forms {
            writeln!(out, "    // form={}", form.signature().join("_")).map_err(fmt_err)?;
            for args in catalog::valid_form_args(form, catalog).map_err(|e| e.with_ctx(&f.name()))? {
                writeln!(out, "    {}({}).unwrap();", f.name(), call_arguments(&sig, &args)).map_err(fmt_err)?;
            }
        }
        writeln!(out, "}}\n").map_err(fmt_err)?;
    }
    Ok(out)
}

fn call_arguments(sig: &Signature, args: &[String]) -> String {
    match sig {
        Signature::Variadic { .. } => format!("&[{}]", args.join(", ")),
        _ => args.join(", "),
    }
}

fn fmt_err(e: std::fmt::Error) -> Error { general_err!(e) }

/// Totals from [check].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub functions: usize,
    pub forms: usize,
    pub invocations: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} functions, {} forms, {} invocations",
            self.functions, self.forms, self.invocations
        )
    }
}

/// Run every validation invocation in-process: each example argument must parse to an
/// operand that satisfies the type tag at its position.
pub fn check(fns: &[Function], catalog: &Catalog) -> Result<Report, Error> {
    let mut report = Report::default();
    for f in fns {
        let name = f.name();
        let sig = f.signature()?;
        report.functions += 1;
        for form in &f.forms {
            report.forms += 1;
            let tags = form.signature();
            for args in catalog::valid_form_args(form, catalog).map_err(|e| e.with_ctx(&name))? {
                let mut rendered = Vec::with_capacity(args.len());
                for (i, (tag, arg)) in tags.iter().zip(args.iter()).enumerate() {
                    let op = catalog::parse_example(arg)?;
                    if !checks::satisfies(&op, tag) {
                        return Err(invariant_err!(
                            ErrorKind::Validation,
                            Some(name.as_str()),
                            "example {} is not a valid {} operand",
                            arg,
                            tag
                        ));
                    }
                    rendered.push(format!("{}={}", sig.parameter_name(i).unwrap_or_default(), op.asm()));
                }
                verbose_println!("{}\t{} {}", name, f.opcode(), rendered.join(", "));
                report.invocations += 1;
            }
        }
    }
    Ok(report)
}

/// Doc blocks of all functions, separated by blank lines.
pub fn docs(fns: &[Function]) -> String {
    fns.iter()
        .map(|f| f.doc().join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One `NAME(params)` line per function.
pub fn listing(fns: &[Function]) -> Result<String, Error> {
    let mut out = String::new();
    for f in fns {
        let names: Vec<String> = f.signature()?.names().iter().map(|n| ident(n)).collect();
        writeln!(out, "{}({})", f.name(), names.join(", ")).map_err(fmt_err)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::instructions_functions;
    use crate::inst::{Form, Instruction};

    fn sample() -> Vec<Instruction> {
        vec![
            Instruction::new("CPUID", "CPU Identification", vec![Form::new(&[])]),
            Instruction::new(
                "SHLQ",
                "Logical Shift Left",
                vec![Form::new(&["1", "r64"]), Form::new(&["cl", "m64"])],
            ),
            Instruction::new(
                "IMULQ",
                "Signed Multiply",
                vec![Form::new(&["r64"]), Form::new(&["imm8", "r64", "r64"])],
            ),
            Instruction::new(
                "VPADDD",
                "Add Packed Doubleword Integers",
                vec![Form::new(&["m128", "xmm", "k", "xmm"]).with_suffixes(&[&[], &["Z"]])],
            ),
        ]
    }

    #[test]
    fn constructor_source() -> Result<(), Error> {
        let insts = sample();
        let fns = instructions_functions(&insts);
        let src = ctors(&fns)?;
        assert!(src.starts_with(GENERATED_WARNING));
        assert!(src.contains("/// CPUID: CPU Identification.\n///\n/// Forms:\n///\n/// \tCPUID\n"));
        assert!(src.contains("pub fn CPUID() -> Result<Instruction, Error> {\n    build(\"CPUID\", vec![])\n}"));
        assert!(src.contains("pub fn SHLQ(c: Operand, mr: Operand) -> Result<Instruction, Error> {"));
        assert!(src.contains("    build(\"SHLQ\", vec![c, mr])"));
        assert!(src.contains("pub fn IMULQ(ops: &[Operand]) -> Result<Instruction, Error> {"));
        assert!(src.contains("    build(\"IMULQ\", ops.to_vec())"));
        assert!(src.contains("    build(\"VPADDD.Z\", vec![m, x, k, x1])"));
        Ok(())
    }

    #[test]
    fn unnamed_positions_become_usable_identifiers() -> Result<(), Error> {
        let insts = vec![Instruction::new("INT", "Interrupt", vec![Form::new(&["3", "1"])])];
        let fns = instructions_functions(&insts);
        let src = ctors(&fns)?;
        assert!(src.contains("pub fn INT(_0: Operand, _1: Operand) -> Result<Instruction, Error> {"));
        assert!(src.contains("    build(\"INT\", vec![_0, _1])"));
        assert!(!src.contains("vec![_,"));
        assert_eq!(listing(&fns)?, "INT(_0, _1)\n");
        assert!(ctors_test(&fns, &catalog::CATALOG)?.contains("    INT(Operand::Imm(3), Operand::Imm(1)).unwrap();\n"));
        Ok(())
    }

    #[test]
    fn test_source() -> Result<(), Error> {
        let insts = sample();
        let fns = instructions_functions(&insts);
        let src = ctors_test(&fns, &catalog::CATALOG)?;
        assert!(src.contains("fn CPUID_valid_forms() {\n    // form=\n    CPUID().unwrap();\n}"));
        assert!(src.contains("    // form=1_r64\n    SHLQ(Operand::Imm(1), Operand::Reg(reg::R11)).unwrap();\n"));
        assert!(src.contains("    IMULQ(&[Operand::Reg(reg::R11)]).unwrap();\n"));
        assert!(src.contains("fn VPADDD_Z_valid_forms() {"));
        Ok(())
    }

    #[test]
    fn check_counts_every_invocation() -> Result<(), Error> {
        let insts = sample();
        let fns = instructions_functions(&insts);
        let report = check(&fns, &catalog::CATALOG)?;
        // one combination per form: CPUID 1, IMULQ 2, SHLQ 2, VPADDD 1, VPADDD_Z 1
        assert_eq!(
            report,
            Report {
                functions: 5,
                forms: 7,
                invocations: 7
            }
        );
        assert_eq!(report.to_string(), "5 functions, 7 forms, 7 invocations");
        Ok(())
    }

    #[test]
    fn check_rejects_bad_examples() {
        let insts = vec![Instruction::new("MOVB", "Move", vec![Form::new(&["imm8", "r8"])])];
        let fns = instructions_functions(&insts);
        let mut c = Catalog::new();
        c.insert("imm8", &["Operand::Imm(4096)"]);
        c.insert("r8", &["Operand::Reg(reg::AL)"]);
        let err = check(&fns, &c).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.ctx.as_deref(), Some("MOVB"));

        c.insert("imm8", &["operand.Imm(1)"]);
        assert_eq!(check(&fns, &c).unwrap_err().kind, ErrorKind::UnknownOperandVariant);

        let c = Catalog::new();
        let err = check(&fns, &c).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingCatalogEntry);
        assert_eq!(err.ctx.as_deref(), Some("MOVB"));
    }

    #[test]
    fn listing_and_docs() -> Result<(), Error> {
        let insts = sample();
        let fns = instructions_functions(&insts);
        assert_eq!(
            listing(&fns)?,
            "CPUID()\nIMULQ(ops)\nSHLQ(c, mr)\nVPADDD(m, x, k, x1)\nVPADDD_Z(m, x, k, x1)\n"
        );
        assert!(docs(&fns).contains("IMULQ: Signed Multiply.\n\nForms:\n\n\tIMULQ r64\n\tIMULQ imm8 r64 r64"));
        Ok(())
    }
}
