use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kernel::formula::Formula;
use crate::kernel::substitution::Substitution;
use crate::kernel::symbol::FunctionSymbol;

/// A variable of the object logic. Variables are identified by their name.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Variable {
    name: String,
}

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable {
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns this variable if it is not in `avoid`.
    /// Otherwise strips any numeric suffix and tries base1, base2, ... until one is free.
    pub fn fresh(&self, avoid: &BTreeSet<Variable>) -> Variable {
        if !avoid.contains(self) {
            return self.clone();
        }
        let stripped = self.name.trim_end_matches(|c: char| c.is_ascii_digit());
        let base = if stripped.is_empty() {
            self.name.as_str()
        } else {
            stripped
        };
        let mut i = 1;
        loop {
            let candidate = Variable::new(&format!("{}{}", base, i));
            if !avoid.contains(&candidate) {
                return candidate;
            }
            i += 1;
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A first-order term.
/// Rust equality on terms is syntactic. Equality inside the logic is the `=` formula,
/// built with `Term::equals`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Term {
    Variable(Variable),
    Application(FunctionSymbol, Vec<Term>),
}

impl Term {
    pub fn var(name: &str) -> Term {
        Term::Variable(Variable::new(name))
    }

    pub fn constant(symbol: &FunctionSymbol) -> Term {
        Term::Application(symbol.clone(), vec![])
    }

    pub fn apply(symbol: &FunctionSymbol, args: Vec<Term>) -> Term {
        Term::Application(symbol.clone(), args)
    }

    pub fn empty_set() -> Term {
        Term::constant(&FunctionSymbol::empty_set())
    }

    /// The formula `self = other`.
    pub fn equals(&self, other: &Term) -> Formula {
        Formula::Equal(self.clone(), other.clone())
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            Term::Application(..) => None,
        }
    }

    pub fn mentions(&self, variable: &Variable) -> bool {
        match self {
            Term::Variable(v) => v == variable,
            Term::Application(_, args) => args.iter().any(|arg| arg.mentions(variable)),
        }
    }

    pub fn collect_variables(&self, output: &mut BTreeSet<Variable>) {
        match self {
            Term::Variable(v) => {
                output.insert(v.clone());
            }
            Term::Application(_, args) => {
                for arg in args {
                    arg.collect_variables(output);
                }
            }
        }
    }

    pub fn collect_functions<'a>(&'a self, output: &mut BTreeSet<&'a FunctionSymbol>) {
        if let Term::Application(symbol, args) = self {
            output.insert(symbol);
            for arg in args {
                arg.collect_functions(output);
            }
        }
    }

    /// Every variable in a term is free.
    pub fn free_variables(&self) -> BTreeSet<Variable> {
        let mut answer = BTreeSet::new();
        self.collect_variables(&mut answer);
        answer
    }

    /// Replaces variables simultaneously. Terms have no binders, so nothing can be captured.
    pub fn substitute(&self, substitution: &Substitution) -> Term {
        match self {
            Term::Variable(v) => match substitution.get(v) {
                Some(replacement) => replacement.clone(),
                None => self.clone(),
            },
            Term::Application(symbol, args) => Term::Application(
                symbol.clone(),
                args.iter().map(|arg| arg.substitute(substitution)).collect(),
            ),
        }
    }

    /// The number of symbol and variable occurrences.
    pub fn size(&self) -> usize {
        match self {
            Term::Variable(_) => 1,
            Term::Application(_, args) => 1 + args.iter().map(|arg| arg.size()).sum::<usize>(),
        }
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Term {
        Term::Variable(variable)
    }
}

impl From<&Variable> for Term {
    fn from(variable: &Variable) -> Term {
        Term::Variable(variable.clone())
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Application(symbol, args) => {
                write!(f, "{}", symbol)?;
                if args.is_empty() {
                    return Ok(());
                }
                write!(f, "(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
