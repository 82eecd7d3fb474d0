//! Definite descriptions: naming "the u such that f(u)".
//!
//! A uniqueness result usually only holds under some premise, `prem ⊢ ∃!u. f(u)`.
//! The constructor turns it into a total operator whose defining formula is
//!
//! ```text
//! completeDef(u) = (prem ⇒ f(u)) ∧ (¬prem ⇒ u = default)
//! ```
//!
//! and proves `⊢ ∃!u. completeDef(u)` from scratch, by cases on the premise.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, trace};

use crate::checker::CheckerConfig;
use crate::kernel::error::ProofError;
use crate::kernel::formula::Formula;
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::signature::{FunctionDefinition, Signature};
use crate::kernel::substitution::Substitution;
use crate::kernel::symbol::FunctionSymbol;
use crate::kernel::term::{Term, Variable};
use crate::kernel::theorem::Theorem;
use crate::lemmas;
use crate::tactics;

/// What the caller asks to define.
#[derive(Clone, Debug)]
pub struct DescriptionRequest {
    pub name: String,
    pub params: Vec<Variable>,
    pub bound: Variable,
    pub formula: Formula,

    /// `prem ⊢ ∃!bound. formula`
    pub justification: Theorem,

    /// The value when the premise fails. The empty set if not given.
    pub default: Option<Term>,
}

impl DescriptionRequest {
    pub fn new(
        name: &str,
        params: Vec<Variable>,
        bound: Variable,
        formula: Formula,
        justification: Theorem,
    ) -> DescriptionRequest {
        DescriptionRequest {
            name: name.to_string(),
            params,
            bound,
            formula,
            justification,
            default: None,
        }
    }

    pub fn with_default(mut self, default: Term) -> DescriptionRequest {
        self.default = Some(default);
        self
    }
}

/// A request that is rejected before any proof is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRequest {
    #[error("the justification must have exactly one conclusion, but it has {0}")]
    ConclusionCount(usize),

    #[error("the justification proves {found} instead of {expected}")]
    ConclusionMismatch { expected: String, found: String },

    #[error("bound variable {variable} occurs free in assumption {assumption}")]
    BoundInAssumption { variable: String, assumption: String },

    #[error("bound variable {0} is also a parameter")]
    BoundIsParameter(String),

    #[error("parameter {0} is listed twice")]
    DuplicateParameter(String),

    #[error("default {default} mentions {variable}, which is not a parameter")]
    DefaultOutOfScope { default: String, variable: String },

    #[error("{0} is free in the definition but is not a parameter")]
    UnlistedVariable(String),

    #[error("{0} is already declared")]
    NameInUse(String),

    #[error("{symbol} in {context} is not declared")]
    UnknownSymbol { symbol: String, context: String },

    #[error("the justification {0} was proved in a different signature")]
    ForeignJustification(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptionError {
    #[error("malformed description: {0}")]
    Malformed(#[from] MalformedRequest),

    #[error("description proof failed: {0}")]
    Proof(#[from] ProofError),
}

/// A function symbol defined as the unique value satisfying a formula.
///
/// Conditional descriptions carry the premise they were justified under; the defining
/// formula is then the completed one, and holds of exactly one value everywhere.
#[derive(Clone, Debug)]
pub struct Description {
    definition: FunctionDefinition,
    formula: Formula,
    premise: Option<Formula>,
    default: Term,
    config: CheckerConfig,
}

/// Flattens conjunctions, drops α-equivalent duplicates, and sorts by canonical key.
/// Returns None when nothing is assumed.
pub fn normalize_premise(assumptions: &[Formula]) -> Option<Formula> {
    let mut leaves: Vec<Formula> = vec![];
    for assumption in assumptions {
        for leaf in assumption.conjuncts() {
            if !leaves.contains(leaf) {
                leaves.push(leaf.clone());
            }
        }
    }
    leaves.sort_by_cached_key(|f| f.canonical_key());
    match leaves.len() {
        0 => None,
        1 => leaves.pop(),
        _ => Some(Formula::and(leaves)),
    }
}

/// `(prem ⇒ f(u)) ∧ (¬prem ⇒ u = default)`
pub fn complete_definition(premise: &Formula, bound: &Variable, formula: &Formula, default: &Term) -> Formula {
    Formula::and(vec![
        Formula::implies(premise.clone(), formula.clone()),
        Formula::implies(premise.negate(), Term::from(bound).equals(default)),
    ])
}

fn validate(signature: &Signature, request: &DescriptionRequest, default: &Term) -> Result<(), MalformedRequest> {
    let just = &request.justification;
    let bound = &request.bound;
    let params = &request.params;

    let conclusions = just.conclusions();
    if conclusions.len() != 1 {
        return Err(MalformedRequest::ConclusionCount(conclusions.len()));
    }
    let expected = Formula::exists_one(bound, request.formula.clone());
    if conclusions[0] != expected {
        return Err(MalformedRequest::ConclusionMismatch {
            expected: expected.to_string(),
            found: conclusions[0].to_string(),
        });
    }

    for assumption in just.assumptions() {
        if assumption.has_free(bound) {
            return Err(MalformedRequest::BoundInAssumption {
                variable: bound.to_string(),
                assumption: assumption.to_string(),
            });
        }
    }

    if params.contains(bound) {
        return Err(MalformedRequest::BoundIsParameter(bound.to_string()));
    }
    let mut seen = BTreeSet::new();
    for param in params {
        if !seen.insert(param) {
            return Err(MalformedRequest::DuplicateParameter(param.to_string()));
        }
    }

    for variable in default.free_variables() {
        if !params.contains(&variable) {
            return Err(MalformedRequest::DefaultOutOfScope {
                default: default.to_string(),
                variable: variable.to_string(),
            });
        }
    }

    let mut free = request.formula.free_variables();
    for assumption in just.assumptions() {
        free.extend(assumption.free_variables());
    }
    for variable in free {
        if &variable != bound && !params.contains(&variable) {
            return Err(MalformedRequest::UnlistedVariable(variable.to_string()));
        }
    }

    let unknown =
        |symbol: String, context: String| MalformedRequest::UnknownSymbol { symbol, context };
    for formula in std::iter::once(&request.formula).chain(just.assumptions()) {
        if let Some(symbol) = signature.unknown_symbol(formula) {
            return Err(unknown(symbol, formula.to_string()));
        }
    }
    if let Some(symbol) = signature.unknown_symbol_in_term(default) {
        return Err(unknown(symbol, default.to_string()));
    }
    if !signature.admits(just) {
        return Err(MalformedRequest::ForeignJustification(just.to_string()));
    }

    if signature.is_declared(&request.name) {
        return Err(MalformedRequest::NameInUse(request.name.clone()));
    }
    Ok(())
}

/// Defines a new function symbol from a uniqueness theorem.
///
/// Without assumptions, the symbol is defined by the formula itself and justified by the given
/// theorem, unchanged. Otherwise the defining formula is completed with the default branch
/// and its unique existence is proved unconditionally.
pub fn construct(
    signature: &mut Signature,
    config: &CheckerConfig,
    request: DescriptionRequest,
) -> Result<Description, DescriptionError> {
    let default = request.default.clone().unwrap_or_else(Term::empty_set);
    validate(signature, &request, &default)?;

    let DescriptionRequest {
        name,
        params,
        bound: u,
        formula: f,
        justification: just,
        ..
    } = request;
    let exists_one = Formula::exists_one(&u, f.clone());

    let Some(premise) = normalize_premise(just.assumptions()) else {
        let justification = if just.is_unconditional() {
            just
        } else {
            // Only trivial assumptions, like an empty conjunction
            rules::tautology(config, Sequent::conclusion(exists_one), &[&just])?
        };
        let definition = signature.define_function(&name, &params, &u, f.clone(), &justification)?;
        debug!(name = %name, "unconditional description");
        return Ok(Description {
            definition,
            formula: f,
            premise: None,
            default,
            config: *config,
        });
    };

    debug!(name = %name, premise = %premise, "conditional description");
    let not_premise = premise.negate();
    let complete = complete_definition(&premise, &u, &f, &default);
    let complete_unique = Formula::exists_one(&u, complete.clone());

    // prem ⊢ ∃!u. f
    let just_premise = rules::tautology(
        config,
        Sequent::new(vec![premise.clone()], vec![exists_one]),
        &[&just],
    )?;

    // Under the premise, f and completeDef agree, so uniqueness carries over.
    let agree = Formula::iff(f.clone(), complete.clone());
    let agreement = rules::tautology(
        config,
        Sequent::new(vec![premise.clone()], vec![agree.clone()]),
        &[],
    )?;
    let agreement = tactics::generalize(&agreement, &agree, &u)?;
    let positive = lemmas::substitute_exists_one(config, &just_premise, &agreement, &u, &f, &complete)?;
    trace!(name = %name, branch = %positive, "premise branch");

    // Without the premise, the default is the witness.
    let at_default = complete.instantiate(&u, &default);
    let reflexive = default.equals(&default);
    let existence = rules::tautology(
        config,
        Sequent::new(vec![not_premise.clone(), reflexive.clone()], vec![at_default]),
        &[],
    )?;
    let existence = rules::cut(&tactics::eq_refl(&default), &existence, &reflexive)?;
    let existence = rules::right_exists(&existence, &u, &complete, &default)?;

    // and any two values satisfying completeDef both equal the default.
    let (v, uniqueness_body) = lemmas::uniqueness_parts(&u, &complete);
    let u_term = Term::from(&u);
    let v_term = Term::from(&v);
    let uniqueness = rules::tautology(
        config,
        Sequent::new(vec![not_premise.clone()], vec![uniqueness_body]),
        &[
            &tactics::eq_transitivity(&u_term, &default, &v_term)?,
            &tactics::eq_symmetry(&v_term, &default)?,
        ],
    )?;
    let uniqueness = lemmas::generalize_uniqueness(&uniqueness, &u, &complete)?;
    let negative = lemmas::exists_one_from_parts(config, &existence, &uniqueness, &u, &complete)?;
    trace!(name = %name, branch = %negative, "fallback branch");

    let total = tactics::cases(
        config,
        &[premise.clone(), not_premise],
        &[&positive, &negative],
        &complete_unique,
    )?;
    let definition = signature.define_function(&name, &params, &u, complete, &total)?;
    Ok(Description {
        definition,
        formula: f,
        premise: Some(premise),
        default,
        config: *config,
    })
}

impl Description {
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn symbol(&self) -> &FunctionSymbol {
        self.definition.symbol()
    }

    pub fn params(&self) -> &[Variable] {
        self.definition.params()
    }

    pub fn bound(&self) -> &Variable {
        self.definition.bound()
    }

    /// The formula the caller asked about, before completion.
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The formula the symbol is actually defined by.
    /// For a conditional description this is the completed formula.
    pub fn complete_definition(&self) -> &Formula {
        self.definition.body()
    }

    /// `⊢ ∃!u. completeDef(u)`
    pub fn justification(&self) -> &Theorem {
        self.definition.justification()
    }

    /// `⊢ (c(params) = u) ⇔ completeDef(u)`
    pub fn definition_theorem(&self) -> &Theorem {
        self.definition.theorem()
    }

    pub fn definition(&self) -> &FunctionDefinition {
        &self.definition
    }

    /// The normalized premise, for conditional descriptions.
    pub fn premise(&self) -> Option<&Formula> {
        self.premise.as_ref()
    }

    pub fn default(&self) -> &Term {
        &self.default
    }

    pub fn is_conditional(&self) -> bool {
        self.premise.is_some()
    }

    /// The term `c(args)`.
    pub fn apply(&self, args: Vec<Term>) -> Term {
        self.definition.apply(args)
    }

    fn constant_term(&self) -> Term {
        self.apply(self.params().iter().map(Term::from).collect())
    }

    fn premise_side(&self) -> Vec<Formula> {
        self.premise.iter().cloned().collect()
    }

    /// `prem ⊢ (c(params) = u) ⇔ f(u)`
    pub fn characterization(&self) -> Result<Theorem, ProofError> {
        if self.premise.is_none() {
            return Ok(self.definition.theorem().clone());
        }
        let equation = self.constant_term().equals(&Term::from(self.bound()));
        rules::tautology(
            &self.config,
            Sequent::new(
                self.premise_side(),
                vec![Formula::iff(equation, self.formula.clone())],
            ),
            &[self.definition.theorem()],
        )
    }

    /// `prem ⊢ f(c(params))`
    pub fn satisfies(&self) -> Result<Theorem, ProofError> {
        let value = self.constant_term();
        let characterization = rules::instantiate(
            &self.characterization()?,
            &Substitution::single(self.bound(), &value),
        );
        rules::tautology(
            &self.config,
            Sequent::new(
                self.premise_side(),
                vec![self.formula.instantiate(self.bound(), &value)],
            ),
            &[&characterization, &tactics::eq_refl(&value)],
        )
    }

    /// `¬prem ⊢ c(params) = default`
    pub fn fallback(&self) -> Result<Theorem, ProofError> {
        let Some(premise) = &self.premise else {
            return Err(ProofError::rejected(
                "fallback",
                format!("{} has no premise to fail", self.name()),
            ));
        };
        let at_default = rules::instantiate(
            self.definition.theorem(),
            &Substitution::single(self.bound(), &self.default),
        );
        rules::tautology(
            &self.config,
            Sequent::new(
                vec![premise.negate()],
                vec![self.constant_term().equals(&self.default)],
            ),
            &[&at_default, &tactics::eq_refl(&self.default)],
        )
    }

    /// `⊢ (c(args) = value) ⇔ completeDef[args, value]`
    pub fn instantiate_definition(&self, args: &[Term], value: &Term) -> Result<Theorem, ProofError> {
        if args.len() != self.params().len() {
            return Err(ProofError::rejected(
                "instantiate definition",
                format!(
                    "{} takes {} arguments, not {}",
                    self.name(),
                    self.params().len(),
                    args.len()
                ),
            ));
        }
        Ok(tactics::unfold_function(&self.definition, args, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::symbol::PredicateSymbol;

    fn atom(name: &str) -> Formula {
        Formula::predicate(&PredicateSymbol::new(name, 0), vec![])
    }

    #[test]
    fn test_normalize_premise_ignores_order_and_duplicates() {
        let (a, b, c) = (atom("A"), atom("B"), atom("C"));
        let first = normalize_premise(&[a.clone() & b.clone(), c.clone(), a.clone()]);
        let second = normalize_premise(&[c.clone(), b.clone(), a.clone()]);
        assert_eq!(first, second);
        assert_eq!(first, Some(Formula::and(vec![a.clone(), b, c])));
        assert_eq!(normalize_premise(&[a.clone(), a.clone()]), Some(a));
        assert_eq!(normalize_premise(&[]), None);
        assert_eq!(normalize_premise(&[Formula::and(vec![])]), None);
    }

    #[test]
    fn test_complete_definition_shape() {
        let u = Variable::new("u");
        let f = Formula::predicate(&PredicateSymbol::new("P", 1), vec![Term::from(&u)]);
        let complete = complete_definition(&atom("A"), &u, &f, &Term::empty_set());
        assert_eq!(complete.to_string(), "((A ⇒ P(u)) ∧ (¬A ⇒ u = ∅))");
    }
}
