//! Derived rules. Each one is a short, fixed composition of kernel rules.

use std::collections::BTreeSet;

use crate::checker::CheckerConfig;
use crate::kernel::error::{ProofError, Result};
use crate::kernel::formula::Formula;
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::signature::{FunctionDefinition, PredicateDefinition};
use crate::kernel::substitution::Substitution;
use crate::kernel::term::{Term, Variable};
use crate::kernel::theorem::Theorem;

/// `∀x. φ ⊢ φ[t/x]`
pub fn forall_elim(formula: &Formula, term: &Term) -> Result<Theorem> {
    forall_elim_all(formula, std::slice::from_ref(term))
}

/// `∀x₁. … ∀xₙ. φ ⊢ φ[t₁/x₁, …, tₙ/xₙ]`
pub fn forall_elim_all(formula: &Formula, terms: &[Term]) -> Result<Theorem> {
    // chain[k] is the formula after eliminating k quantifiers
    let mut chain = vec![formula.clone()];
    for term in terms {
        let current = &chain[chain.len() - 1];
        let Some((variable, body)) = current.as_forall() else {
            return Err(ProofError::rejected(
                "forall elimination",
                format!("{} is not universally quantified", current),
            ));
        };
        let next = body.instantiate(variable, term);
        chain.push(next);
    }
    let mut theorem = rules::hypothesis(&chain[terms.len()]);
    for k in (0..terms.len()).rev() {
        if let Some((variable, body)) = chain[k].as_forall() {
            theorem = rules::left_forall(&theorem, variable, body, &terms[k])?;
        }
    }
    Ok(theorem)
}

/// From `Γ ⊢ φ, Δ` with `x` not free in `Γ` or `Δ`, concludes `Γ ⊢ ∀x. φ, Δ`.
pub fn generalize(theorem: &Theorem, formula: &Formula, variable: &Variable) -> Result<Theorem> {
    rules::right_forall(theorem, variable, formula, variable)
}

/// Generalizes over several variables, the first one outermost.
pub fn generalize_all(theorem: &Theorem, formula: &Formula, variables: &[Variable]) -> Result<Theorem> {
    let mut theorem = theorem.clone();
    let mut formula = formula.clone();
    for variable in variables.iter().rev() {
        theorem = generalize(&theorem, &formula, variable)?;
        formula = Formula::forall(variable, formula);
    }
    Ok(theorem)
}

/// `⊢ t = t`
pub fn eq_refl(term: &Term) -> Theorem {
    rules::right_refl(term)
}

fn fresh_for(terms: &[&Term]) -> Variable {
    let mut avoid = BTreeSet::new();
    for term in terms {
        term.collect_variables(&mut avoid);
    }
    Variable::new("z").fresh(&avoid)
}

/// `a = b ⊢ b = a`
pub fn eq_symmetry(a: &Term, b: &Term) -> Result<Theorem> {
    let z = fresh_for(&[a, b]);
    let body = Term::from(&z).equals(a);
    rules::right_subst_eq(&rules::right_refl(a), a, b, &z, &body)
}

/// `a = b, b = c ⊢ a = c`
pub fn eq_transitivity(a: &Term, b: &Term, c: &Term) -> Result<Theorem> {
    let z = fresh_for(&[a, b, c]);
    let body = a.equals(&Term::from(&z));
    rules::right_subst_eq(&rules::hypothesis(&a.equals(b)), b, c, &z, &body)
}

/// `⊢ P(args) ⇔ body[args]`
pub fn unfold(definition: &PredicateDefinition, args: &[Term]) -> Theorem {
    rules::instantiate(
        definition.theorem(),
        &Substitution::zip(definition.params(), args),
    )
}

/// `⊢ (f(args) = value) ⇔ body[args, value]`
pub fn unfold_function(definition: &FunctionDefinition, args: &[Term], value: &Term) -> Theorem {
    let mut substitution = Substitution::zip(definition.params(), args);
    substitution.set(definition.bound().clone(), value.clone());
    rules::instantiate(definition.theorem(), &substitution)
}

/// Combines proofs of `goal` under each guard into a proof with the guards discharged.
///
/// Branch i proves `Γᵢ, gᵢ ⊢ goal`. The guards must be exhaustive, which is checked by
/// proving `⊢ g₁ ∨ … ∨ gₙ` propositionally. The result is `Γ₁, …, Γₙ ⊢ goal`.
pub fn cases(
    config: &CheckerConfig,
    guards: &[Formula],
    branches: &[&Theorem],
    goal: &Formula,
) -> Result<Theorem> {
    let disjunction = Formula::or(guards.to_vec());
    let exhaustive = rules::tautology(config, Sequent::conclusion(disjunction.clone()), &[])
        .map_err(|e| {
            ProofError::rejected("cases", format!("guards are not exhaustive: {}", e))
        })?;
    for branch in branches {
        if branch.conclusions() != std::slice::from_ref(goal) {
            return Err(ProofError::rejected(
                "cases",
                format!("branch {} does not conclude exactly {}", branch, goal),
            ));
        }
    }
    let combined = rules::left_or(branches, guards)?;
    rules::cut(&exhaustive, &combined, &disjunction)
}
