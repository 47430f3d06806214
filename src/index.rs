//! Groups an instruction's forms by the suffix combinations they support.
use super::inst::Form;
use super::*;

/// The forms that support one particular suffix combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub suffixes: Vec<String>,
    pub forms: Vec<&'a Form>,
}

/// One group per distinct suffix combination, in the order combinations are first seen.
/// A form supporting several combinations appears in each of their groups.
pub fn group(forms: &[Form]) -> Vec<Group<'_>> {
    let mut groups: Vec<Group> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();
    for form in forms {
        for suffixes in form.supported_suffixes() {
            let key = suffixes.join(".");
            let idx = match by_key.get(&key) {
                Some(&idx) => idx,
                None => {
                    by_key.insert(key, groups.len());
                    groups.push(Group {
                        suffixes,
                        forms: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            groups[idx].forms.push(form);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Form> {
        vec![
            Form::new(&["m128", "xmm", "k", "xmm"]).with_suffixes(&[&[], &["Z"], &["BCST"], &["BCST", "Z"]]),
            Form::new(&["xmm", "xmm", "k", "xmm"]).with_suffixes(&[&[], &["Z"]]),
            Form::new(&["xmm", "xmm", "xmm"]),
        ]
    }

    #[test]
    fn first_seen_order() {
        let forms = sample();
        let groups = group(&forms);
        let keys: Vec<String> = groups.iter().map(|g| g.suffixes.join(".")).collect();
        assert_eq!(keys, vec!["", "Z", "BCST", "BCST.Z"]);
        assert_eq!(groups[0].forms, vec![&forms[0], &forms[1], &forms[2]]);
        assert_eq!(groups[1].forms, vec![&forms[0], &forms[1]]);
        assert_eq!(groups[2].forms, vec![&forms[0]]);
        assert_eq!(groups[3].forms, vec![&forms[0]]);
    }

    #[test]
    fn every_form_lands_in_exactly_its_groups() {
        let forms = sample();
        let groups = group(&forms);
        for form in &forms {
            assert!(groups.iter().any(|g| g.forms.contains(&form)));
            for g in &groups {
                let declared = form.supported_suffixes().contains(&g.suffixes);
                assert_eq!(g.forms.contains(&form), declared);
            }
        }
    }

    #[test]
    fn no_forms_no_groups() {
        assert!(group(&[]).is_empty());
    }
}
