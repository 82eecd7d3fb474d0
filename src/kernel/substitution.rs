use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kernel::term::{Term, Variable};

/// A simultaneous replacement of variables by terms.
/// Applying it to a formula never captures: binders that would capture a replacement are renamed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    map: BTreeMap<Variable, Term>,
}

impl Substitution {
    pub fn new() -> Substitution {
        Substitution {
            map: BTreeMap::new(),
        }
    }

    pub fn single(variable: &Variable, term: &Term) -> Substitution {
        let mut answer = Substitution::new();
        answer.set(variable.clone(), term.clone());
        answer
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Variable, Term)>) -> Substitution {
        let mut answer = Substitution::new();
        for (variable, term) in pairs {
            answer.set(variable, term);
        }
        answer
    }

    /// Maps each variable to the corresponding term, position by position.
    pub fn zip(variables: &[Variable], terms: &[Term]) -> Substitution {
        Substitution::from_pairs(variables.iter().cloned().zip(terms.iter().cloned()))
    }

    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        self.map.get(variable)
    }

    /// Mapping a variable to itself is dropped, so identity entries never show up.
    pub fn set(&mut self, variable: Variable, term: Term) {
        if term.as_variable() == Some(&variable) {
            self.map.remove(&variable);
        } else {
            self.map.insert(variable, term);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.map.iter()
    }

    pub fn domain(&self) -> impl Iterator<Item = &Variable> {
        self.map.keys()
    }

    /// The same substitution without an entry for `variable`.
    /// Used when going under a binder for that variable.
    pub fn without(&self, variable: &Variable) -> Substitution {
        let mut answer = self.clone();
        answer.map.remove(variable);
        answer
    }

    /// Keeps only the entries for the given variables.
    pub fn restricted_to(&self, variables: &BTreeSet<Variable>) -> Substitution {
        Substitution {
            map: self
                .map
                .iter()
                .filter(|(v, _)| variables.contains(*v))
                .map(|(v, t)| (v.clone(), t.clone()))
                .collect(),
        }
    }

    /// The variables occurring in replacement terms. A binder for any of these would capture.
    pub fn range_variables(&self) -> BTreeSet<Variable> {
        let mut answer = BTreeSet::new();
        for term in self.map.values() {
            term.collect_variables(&mut answer);
        }
        answer
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, (variable, term)) in self.map.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} := {}", variable, term)?;
        }
        write!(f, "]")
    }
}
