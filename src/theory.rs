use im::{HashMap, Vector};
use thiserror::Error;
use tracing::info;

use crate::checker::CheckerConfig;
use crate::description::{self, Description, DescriptionError, DescriptionRequest};
use crate::kernel::error::ProofError;
use crate::kernel::formula::Formula;
use crate::kernel::signature::{FunctionDefinition, PredicateDefinition, Signature};
use crate::kernel::symbol::{FunctionSymbol, PredicateSymbol};
use crate::kernel::term::Variable;
use crate::kernel::theorem::Theorem;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("a theorem named {0} is already recorded")]
    DuplicateTheorem(String),

    #[error("no theorem named {0}")]
    UnknownTheorem(String),

    #[error("{0} was proved in a different signature")]
    ForeignTheorem(String),

    #[error(transparent)]
    Proof(#[from] ProofError),
}

/// A signature plus the named theorems proved in it.
///
/// The store is append-only: a name is recorded once and never replaced.
/// Cloning a theory is cheap and shares every theorem.
#[derive(Clone, Debug, Default)]
pub struct Theory {
    signature: Signature,
    config: CheckerConfig,
    theorems: HashMap<String, Theorem>,
    order: Vector<String>,
}

impl Theory {
    pub fn new(config: CheckerConfig) -> Theory {
        Theory {
            signature: Signature::new(),
            config,
            theorems: HashMap::new(),
            order: Vector::new(),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    pub fn declare_function(&mut self, name: &str, arity: usize) -> Result<FunctionSymbol, TheoryError> {
        Ok(self.signature.declare_function(name, arity)?)
    }

    pub fn declare_predicate(&mut self, name: &str, arity: usize) -> Result<PredicateSymbol, TheoryError> {
        Ok(self.signature.declare_predicate(name, arity)?)
    }

    /// Asserts an axiom and records it under its own name.
    pub fn axiom(&mut self, name: &str, formula: Formula) -> Result<Theorem, TheoryError> {
        if self.theorems.contains_key(name) {
            return Err(TheoryError::DuplicateTheorem(name.to_string()));
        }
        let theorem = self.signature.axiom(name, formula)?;
        self.record(name, theorem)
    }

    pub fn define_predicate(
        &mut self,
        name: &str,
        params: &[Variable],
        body: Formula,
    ) -> Result<PredicateDefinition, TheoryError> {
        Ok(self.signature.define_predicate(name, params, body)?)
    }

    pub fn define_function(
        &mut self,
        name: &str,
        params: &[Variable],
        bound: &Variable,
        body: Formula,
        justification: &Theorem,
    ) -> Result<FunctionDefinition, TheoryError> {
        Ok(self
            .signature
            .define_function(name, params, bound, body, justification)?)
    }

    /// Introduces a definite description. See `description::construct`.
    pub fn describe(&mut self, request: DescriptionRequest) -> Result<Description, DescriptionError> {
        let config = self.config;
        description::construct(&mut self.signature, &config, request)
    }

    /// Records a theorem under a new name and returns it.
    pub fn record(&mut self, name: &str, theorem: Theorem) -> Result<Theorem, TheoryError> {
        if self.theorems.contains_key(name) {
            return Err(TheoryError::DuplicateTheorem(name.to_string()));
        }
        if !self.signature.admits(&theorem) {
            return Err(TheoryError::ForeignTheorem(name.to_string()));
        }
        info!(name, theorem = %theorem, "recorded");
        self.theorems.insert(name.to_string(), theorem.clone());
        self.order.push_back(name.to_string());
        Ok(theorem)
    }

    pub fn theorem(&self, name: &str) -> Result<&Theorem, TheoryError> {
        self.theorems
            .get(name)
            .ok_or_else(|| TheoryError::UnknownTheorem(name.to_string()))
    }

    /// All recorded theorems, in the order they were recorded.
    pub fn theorems(&self) -> impl Iterator<Item = (&str, &Theorem)> {
        self.order.iter().filter_map(|name| {
            self.theorems
                .get(name)
                .map(|theorem| (name.as_str(), theorem))
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::rules;
    use crate::kernel::term::Term;

    #[test]
    fn test_record_is_append_only() {
        let mut theory = Theory::default();
        let refl = rules::right_refl(&Term::var("x"));
        theory.record("refl", refl.clone()).unwrap();
        let err = theory.record("refl", rules::right_refl(&Term::var("y"))).unwrap_err();
        assert_eq!(err, TheoryError::DuplicateTheorem("refl".to_string()));
        assert!(theory.theorem("refl").unwrap().same_as(&refl));
        assert!(matches!(
            theory.theorem("missing"),
            Err(TheoryError::UnknownTheorem(_))
        ));
    }

    #[test]
    fn test_clones_share_theorems() {
        let mut theory = Theory::default();
        let refl = theory.record("refl", rules::right_refl(&Term::empty_set())).unwrap();
        let snapshot = theory.clone();
        theory.record("refl2", rules::right_refl(&Term::var("a"))).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(theory.len(), 2);
        assert!(snapshot.theorem("refl").unwrap().same_as(&refl));
        let names: Vec<&str> = theory.theorems().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["refl", "refl2"]);
    }

    #[test]
    fn test_record_refuses_theorems_from_other_theories() {
        let mut one = Theory::default();
        let mut two = Theory::default();
        let a = one.declare_predicate("A", 0).unwrap();
        let axiom = one.axiom("a", Formula::predicate(&a, vec![])).unwrap();
        assert_eq!(
            two.record("a", axiom).unwrap_err(),
            TheoryError::ForeignTheorem("a".to_string())
        );
        assert!(two.is_empty());
    }
}
