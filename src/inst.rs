//! Instruction table data: instructions, their forms, and the operand type tags of each form.
use super::*;

/// One operand slot of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOperand {
    /// operand class tag, e.g. "r64", "m128", "imm8", "rel32"
    pub type_tag: String,
}
impl FormOperand {
    pub fn new(type_tag: &str) -> Self {
        FormOperand {
            type_tag: type_tag.to_string(),
        }
    }
}

/// One operand signature supported by an instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub operands: Vec<FormOperand>,
    /// suffix combinations this form accepts; empty means only the bare opcode
    pub suffixes: Vec<Vec<String>>,
}

impl Form {
    pub fn new(type_tags: &[&str]) -> Self {
        Form {
            operands: type_tags.iter().map(|t| FormOperand::new(t)).collect(),
            suffixes: Vec::new(),
        }
    }
    pub fn with_suffixes(mut self, combos: &[&[&str]]) -> Self {
        self.suffixes = combos
            .iter()
            .map(|c| c.iter().map(|s| s.to_string()).collect())
            .collect();
        self
    }
    pub fn arity(&self) -> usize { self.operands.len() }
    /// Every suffix combination this form supports, in declaration order.
    pub fn supported_suffixes(&self) -> Vec<Vec<String>> {
        if self.suffixes.is_empty() {
            vec![Vec::new()]
        } else {
            self.suffixes.clone()
        }
    }
    /// The operand type tags, in operand order.
    pub fn signature(&self) -> Vec<String> { self.operands.iter().map(|o| o.type_tag.clone()).collect() }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: String,
    pub summary: String,
    pub forms: Vec<Form>,
}

impl Instruction {
    pub fn new(opcode: &str, summary: &str, forms: Vec<Form>) -> Self {
        Instruction {
            opcode: opcode.to_string(),
            summary: summary.to_string(),
            forms,
        }
    }
}

/// The distinct arities among `forms`, ascending.
pub fn arities(forms: &[&Form]) -> Vec<usize> {
    let mut a: Vec<usize> = forms.iter().map(|f| f.arity()).collect();
    a.sort_unstable();
    a.dedup();
    a
}

/// The single arity shared by all `forms`.
pub fn arity(forms: &[&Form]) -> Result<usize, Error> {
    match arities(forms).as_slice() {
        [n] => Ok(*n),
        [] => Err(invariant_err!(ErrorKind::ArityMismatch, None, "no forms to take an arity from")),
        many => Err(invariant_err!(
            ErrorKind::ArityMismatch,
            None,
            "forms disagree on arity: {:?}",
            many
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_suffixes() {
        let f = Form::new(&["imm8", "r64"]);
        assert_eq!(f.supported_suffixes(), vec![Vec::<String>::new()]);
        let f = f.with_suffixes(&[&[], &["Z"]]);
        assert_eq!(f.supported_suffixes(), vec![vec![], vec!["Z".to_string()]]);
        assert_eq!(f.signature(), vec!["imm8", "r64"]);
    }

    #[test]
    fn arity_classes() {
        let none = Form::new(&[]);
        let one = Form::new(&["r64"]);
        let two = Form::new(&["r64", "r64"]);
        assert_eq!(arities(&[&none]), vec![0]);
        assert_eq!(arity(&[&none]).ok(), Some(0));
        assert_eq!(arities(&[&two, &two]), vec![2]);
        assert_eq!(arities(&[&two, &one, &two]), vec![1, 2]);
        assert_eq!(arity(&[&two, &two]).ok(), Some(2));
        assert_eq!(arity(&[&one, &two]).unwrap_err().kind, ErrorKind::ArityMismatch);
        assert_eq!(arity(&[]).unwrap_err().kind, ErrorKind::ArityMismatch);
    }
}
