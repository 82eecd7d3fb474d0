use std::fmt;

use serde::{Deserialize, Serialize};

/// The name of the empty set constant. Descriptions without an explicit default fall back to it.
pub const EMPTY_SET: &str = "∅";

/// A function symbol of the object logic. Constants are function symbols of arity zero.
/// Symbols are unique by name inside a Signature, so the name is the identity.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct FunctionSymbol {
    name: String,
    arity: usize,
}

impl FunctionSymbol {
    pub fn new(name: &str, arity: usize) -> FunctionSymbol {
        FunctionSymbol {
            name: name.to_string(),
            arity,
        }
    }

    /// The builtin empty set constant.
    pub fn empty_set() -> FunctionSymbol {
        FunctionSymbol::new(EMPTY_SET, 0)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn is_constant(&self) -> bool {
        self.arity == 0
    }
}

impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A predicate symbol of the object logic.
/// Equality is not a predicate symbol; it has its own Formula variant.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PredicateSymbol {
    name: String,
    arity: usize,
}

impl PredicateSymbol {
    pub fn new(name: &str, arity: usize) -> PredicateSymbol {
        PredicateSymbol {
            name: name.to_string(),
            arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Binary predicates named by an operator, like ∈, are printed infix.
    pub fn is_infix(&self) -> bool {
        self.arity == 2 && !self.name.chars().any(|c| c.is_alphanumeric() || c == '_')
    }
}

impl fmt::Display for PredicateSymbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
