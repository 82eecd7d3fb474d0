use std::fmt;

use crate::kernel::formula::Formula;
use crate::kernel::substitution::Substitution;
use crate::kernel::term::{Term, Variable};

/// The kind of definition a definitional step introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Axiom,
    Predicate,
    Function,
}

/// The inference that produced a theorem, with the parameters needed to replay it.
/// The premises themselves are stored on the theorem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Hypothesis,
    Weakening,

    /// The formula that was cut away.
    Cut(Formula),

    LeftNot(Formula),
    RightNot(Formula),
    LeftAnd(Formula),
    RightAnd(Formula),
    LeftOr(Formula),
    RightOr(Formula),
    LeftImplies(Formula),
    RightImplies(Formula),
    LeftIff(Formula),
    RightIff(Formula),

    /// The quantified formula and the term it was instantiated with.
    LeftForall(Formula, Term),

    /// The quantified formula and the eigenvariable.
    RightForall(Formula, Variable),
    LeftExists(Formula, Variable),
    RightExists(Formula, Term),

    LeftExistsOne(Formula),
    RightExistsOne(Formula),

    Reflexivity(Term),

    /// The equation that licensed the rewrite.
    LeftSubstitution(Formula),
    RightSubstitution(Formula),

    Instantiation(Substitution),

    /// Propositional consequence of the premises, decided by the checker.
    Tautology,

    /// A definitional step introducing a new name.
    Definition(DefinitionKind, String),
}

impl Rule {
    /// Returns a human-readable name for this rule.
    pub fn name(&self) -> &str {
        match self {
            Rule::Hypothesis => "Hypothesis",
            Rule::Weakening => "Weakening",
            Rule::Cut(_) => "Cut",
            Rule::LeftNot(_) => "Left Not",
            Rule::RightNot(_) => "Right Not",
            Rule::LeftAnd(_) => "Left And",
            Rule::RightAnd(_) => "Right And",
            Rule::LeftOr(_) => "Left Or",
            Rule::RightOr(_) => "Right Or",
            Rule::LeftImplies(_) => "Left Implies",
            Rule::RightImplies(_) => "Right Implies",
            Rule::LeftIff(_) => "Left Iff",
            Rule::RightIff(_) => "Right Iff",
            Rule::LeftForall(..) => "Left Forall",
            Rule::RightForall(..) => "Right Forall",
            Rule::LeftExists(..) => "Left Exists",
            Rule::RightExists(..) => "Right Exists",
            Rule::LeftExistsOne(_) => "Left Exists One",
            Rule::RightExistsOne(_) => "Right Exists One",
            Rule::Reflexivity(_) => "Reflexivity",
            Rule::LeftSubstitution(_) => "Left Substitution",
            Rule::RightSubstitution(_) => "Right Substitution",
            Rule::Instantiation(_) => "Instantiation",
            Rule::Tautology => "Tautology",
            Rule::Definition(DefinitionKind::Axiom, _) => "Axiom",
            Rule::Definition(DefinitionKind::Predicate, _) => "Predicate Definition",
            Rule::Definition(DefinitionKind::Function, _) => "Function Definition",
        }
    }

    /// Definitional steps are the only leaves that are not hypotheses or reflexivity.
    pub fn is_definition(&self) -> bool {
        matches!(self, Rule::Definition(..))
    }

    pub fn is_axiom(&self) -> bool {
        matches!(self, Rule::Definition(DefinitionKind::Axiom, _))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rule::Hypothesis | Rule::Weakening | Rule::Tautology => write!(f, "{}", self.name()),
            Rule::Cut(formula)
            | Rule::LeftNot(formula)
            | Rule::RightNot(formula)
            | Rule::LeftAnd(formula)
            | Rule::RightAnd(formula)
            | Rule::LeftOr(formula)
            | Rule::RightOr(formula)
            | Rule::LeftImplies(formula)
            | Rule::RightImplies(formula)
            | Rule::LeftIff(formula)
            | Rule::RightIff(formula)
            | Rule::LeftExistsOne(formula)
            | Rule::RightExistsOne(formula)
            | Rule::LeftSubstitution(formula)
            | Rule::RightSubstitution(formula) => write!(f, "{} on {}", self.name(), formula),
            Rule::LeftForall(formula, term) | Rule::RightExists(formula, term) => {
                write!(f, "{} on {} with {}", self.name(), formula, term)
            }
            Rule::RightForall(formula, variable) | Rule::LeftExists(formula, variable) => {
                write!(f, "{} on {} with {}", self.name(), formula, variable)
            }
            Rule::Reflexivity(term) => write!(f, "{} for {}", self.name(), term),
            Rule::Instantiation(substitution) => write!(f, "{} {}", self.name(), substitution),
            Rule::Definition(_, name) => write!(f, "{} of {}", self.name(), name),
        }
    }
}

/// A single inference in a derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofStep {
    pub rule: Rule,

    /// The length of the longest chain of inferences leading here.
    /// Leaves have depth zero.
    pub depth: u32,
}

impl ProofStep {
    pub fn new(rule: Rule, premise_depths: impl IntoIterator<Item = u32>) -> ProofStep {
        let depth = premise_depths.into_iter().map(|d| d + 1).max().unwrap_or(0);
        ProofStep { rule, depth }
    }
}

impl fmt::Display for ProofStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.rule)
    }
}
