//! Loader for the line-oriented instruction table format.
//!
//! Each non-comment line describes one form:
//! ```text
//! OPCODE  TAGS  [{COMBOS}]  ["Summary"]
//! ```
//! - `TAGS` is a comma separated list of operand type tags, or `-` for none
//! - `COMBOS` is a `|` separated list of suffix combinations whose tokens are
//!   separated by `.`; an empty alternative stands for the bare opcode
//!
//! Lines sharing an opcode add forms to the same instruction. The first summary seen wins.
//! Blank lines and lines starting with `#` or `;` are ignored.
use super::inst::{Form, FormOperand, Instruction};
use super::*;

use lazy_static::lazy_static;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// The x86 table compiled into the binary.
const BUILTIN: &str = include_str!("../data/x86.tbl");

lazy_static! {
    static ref RE_COMMENT_OR_BLANK_LINE: Regex = Regex::new(r"^(?:[ \t]*[#;].*)|^[ \t]*$").unwrap();
    static ref RE_FORM: Regex = Regex::new(
        r#"^[ \t]*([A-Z][A-Z0-9_]*)[ \t]+(-|[A-Za-z0-9_]+(?:,[A-Za-z0-9_]+)*)(?:[ \t]+\{([A-Z0-9_.|]*)\})?(?:[ \t]+"([^"]*)")?[ \t]*$"#
    )
    .unwrap();
}

pub fn builtin() -> Result<Vec<Instruction>, Error> { from_str_iter(BUILTIN.lines()) }

pub fn load_from_file(path: &Path) -> Result<Vec<Instruction>, Error> {
    let lines = BufReader::new(File::open(path)?)
        .lines()
        .collect::<Result<Vec<String>, io::Error>>()?;
    from_str_iter(lines).map_err(|e| e.with_ctx(&path.display().to_string()))
}

pub fn from_str_iter<I, T>(iter: I) -> Result<Vec<Instruction>, Error>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let mut instructions: Vec<Instruction> = Vec::new();
    let mut by_opcode: HashMap<String, usize> = HashMap::new();
    for (n, line) in iter.into_iter().enumerate() {
        let line = line.as_ref();
        if RE_COMMENT_OR_BLANK_LINE.is_match(line) {
            continue;
        }
        let c = RE_FORM
            .captures(line)
            .ok_or_else(|| syntax_err_line!(n + 1, format!("unrecognized form \"{}\"", line.trim())))?;
        let opcode = &c[1];
        let form = Form {
            operands: parse_tags(&c[2]),
            suffixes: c.get(3).map(|m| parse_combos(m.as_str())).unwrap_or_default(),
        };
        let summary = c.get(4).map_or("", |m| m.as_str());
        let idx = *by_opcode.entry(opcode.to_string()).or_insert_with(|| {
            instructions.push(Instruction::new(opcode, "", Vec::new()));
            instructions.len() - 1
        });
        let inst = &mut instructions[idx];
        if inst.summary.is_empty() {
            inst.summary = summary.to_string();
        }
        inst.forms.push(form);
    }
    verbose_println!("loaded {} instructions", instructions.len());
    Ok(instructions)
}

fn parse_tags(s: &str) -> Vec<FormOperand> {
    if s == "-" {
        return Vec::new();
    }
    s.split(',').map(FormOperand::new).collect()
}

fn parse_combos(s: &str) -> Vec<Vec<String>> {
    s.split('|')
        .map(|combo| {
            combo
                .split('.')
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lines() -> Result<(), Error> {
        let src = [
            "# comment",
            "",
            "CPUID   -                     \"CPU Identification\"",
            "ADDB    imm8,al               \"Add\"",
            "ADDB    r8,r8",
            "  ; indented comment",
            "VPADDD  m512,zmm,k,zmm  {|Z|BCST|BCST.Z}  \"Add Packed Doubleword Integers\"",
        ];
        let insts = from_str_iter(src)?;
        assert_eq!(insts.len(), 3);
        assert_eq!(insts[0].opcode, "CPUID");
        assert!(insts[0].forms[0].operands.is_empty());
        assert_eq!(insts[1].summary, "Add");
        assert_eq!(insts[1].forms.len(), 2);
        assert_eq!(insts[1].forms[1].signature(), vec!["r8", "r8"]);
        assert_eq!(insts[1].forms[1].supported_suffixes(), vec![Vec::<String>::new()]);
        let combos = insts[2].forms[0].supported_suffixes();
        assert_eq!(combos.len(), 4);
        assert!(combos[0].is_empty());
        assert_eq!(combos[3], vec!["BCST", "Z"]);
        Ok(())
    }

    #[test]
    fn syntax_errors_name_the_line() {
        let err = from_str_iter(["NOP -", "add r8"]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.msg.contains("line 2"));
    }

    fn temp_table(name: &str, contents: &str) -> Result<std::path::PathBuf, Error> {
        let path = std::env::temp_dir().join(format!("formgen-{}-{}.tbl", std::process::id(), name));
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    #[test]
    fn load_table_file() -> Result<(), Error> {
        let path = temp_table("ok", "; test table\nSHLQ 1,r64 \"Logical Shift Left\"\nSHLQ cl,m64\n")?;
        let insts = load_from_file(&path);
        std::fs::remove_file(&path)?;
        let insts = insts?;
        assert_eq!(insts.len(), 1);
        assert_eq!(insts[0].summary, "Logical Shift Left");
        assert_eq!(insts[0].forms[1].signature(), vec!["cl", "m64"]);
        Ok(())
    }

    #[test]
    fn load_errors_name_the_file() -> Result<(), Error> {
        let path = temp_table("bad", "CPUID -\nnot a form\n")?;
        let err = load_from_file(&path).unwrap_err();
        std::fs::remove_file(&path)?;
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(err.msg.contains("line 2"));
        assert_eq!(err.ctx, Some(path.display().to_string()));

        let missing = std::env::temp_dir().join(format!("formgen-{}-missing.tbl", std::process::id()));
        let err = load_from_file(&missing).unwrap_err();
        assert_eq!(err.kind, ErrorKind::IO);
        Ok(())
    }

    #[test]
    fn builtin_table_loads() -> Result<(), Error> {
        let insts = builtin()?;
        assert!(insts.iter().any(|i| i.opcode == "CPUID" && i.forms.len() == 1));
        assert!(insts.iter().all(|i| !i.forms.is_empty() && !i.summary.is_empty()));
        Ok(())
    }
}
