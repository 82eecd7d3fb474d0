//! Generic lemmas about unique existence, usable with any bound variable and formula.

use std::collections::BTreeSet;

use crate::checker::CheckerConfig;
use crate::kernel::error::Result;
use crate::kernel::formula::Formula;
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::term::{Term, Variable};
use crate::kernel::theorem::Theorem;
use crate::tactics;

fn avoiding(bound: &Variable, formulas: &[&Formula]) -> BTreeSet<Variable> {
    let mut avoid = BTreeSet::new();
    avoid.insert(bound.clone());
    for f in formulas {
        avoid.extend(f.free_variables());
    }
    avoid
}

/// The second variable of a uniqueness statement, and its body `(P(u) ∧ P(v)) ⇒ u = v`.
pub fn uniqueness_parts(bound: &Variable, formula: &Formula) -> (Variable, Formula) {
    let other = Variable::new("v").fresh(&avoiding(bound, &[formula]));
    let other_term = Term::from(&other);
    let body = Formula::implies(
        Formula::and(vec![formula.clone(), formula.instantiate(bound, &other_term)]),
        Term::from(bound).equals(&other_term),
    );
    (other, body)
}

/// `∀u. ∀v. ((P(u) ∧ P(v)) ⇒ u = v)`
pub fn uniqueness_statement(bound: &Variable, formula: &Formula) -> Formula {
    let (other, body) = uniqueness_parts(bound, formula);
    Formula::forall_all(&[bound.clone(), other], body)
}

/// From `Σ ⊢ (P(u) ∧ P(v)) ⇒ u = v` with `u` and `v` not free in `Σ`,
/// concludes `Σ ⊢ ∀u. ∀v. ((P(u) ∧ P(v)) ⇒ u = v)`.
pub fn generalize_uniqueness(theorem: &Theorem, bound: &Variable, formula: &Formula) -> Result<Theorem> {
    let (other, body) = uniqueness_parts(bound, formula);
    tactics::generalize_all(theorem, &body, &[bound.clone(), other])
}

/// From `Γ ⊢ ∃!u. P` and `Σ ⊢ ∀u. (P ⇔ Q)`, concludes `Γ, Σ ⊢ ∃!u. Q`.
pub fn substitute_exists_one(
    config: &CheckerConfig,
    existence: &Theorem,
    equivalence: &Theorem,
    bound: &Variable,
    from: &Formula,
    to: &Formula,
) -> Result<Theorem> {
    let witness = Variable::new("y").fresh(&avoiding(bound, &[from, to]));
    let u = Term::from(bound);
    let y = Term::from(&witness);

    let same = Formula::iff(from.clone(), to.clone());
    let old_unique = Formula::iff(u.equals(&y), from.clone());
    let new_unique = Formula::iff(u.equals(&y), to.clone());

    // P ⇔ Q, (u = y ⇔ P) ⊢ (u = y ⇔ Q)
    let step = rules::tautology(
        config,
        Sequent::new(vec![same.clone(), old_unique.clone()], vec![new_unique.clone()]),
        &[],
    )?;
    let step = rules::left_forall(&step, bound, &same, &u)?;
    let step = rules::left_forall(&step, bound, &old_unique, &u)?;
    let step = rules::right_forall(&step, bound, &new_unique, bound)?;

    // ∀u. (P ⇔ Q), ∃y. ∀u. (u = y ⇔ P) ⊢ ∃y. ∀u. (u = y ⇔ Q)
    let new_all = Formula::forall(bound, new_unique);
    let step = rules::right_exists(&step, &witness, &new_all, &y)?;
    let old_all = Formula::forall(bound, old_unique);
    let step = rules::left_exists(&step, &witness, &old_all, &witness)?;

    let step = rules::left_exists_one(&step, bound, from)?;
    let step = rules::right_exists_one(&step, bound, to)?;

    let step = rules::cut(existence, &step, &Formula::exists_one(bound, from.clone()))?;
    rules::cut(equivalence, &step, &Formula::forall(bound, same))
}

/// From `Γ ⊢ ∃u. P` and `Σ ⊢ ∀u. ∀v. ((P(u) ∧ P(v)) ⇒ u = v)`, concludes `Γ, Σ ⊢ ∃!u. P`.
/// The uniqueness theorem must conclude exactly `uniqueness_statement(u, P)`, up to α-equivalence.
pub fn exists_one_from_parts(
    config: &CheckerConfig,
    existence: &Theorem,
    uniqueness: &Theorem,
    bound: &Variable,
    formula: &Formula,
) -> Result<Theorem> {
    let witness = Variable::new("y").fresh(&avoiding(bound, &[formula]));
    let u = Term::from(bound);
    let y = Term::from(&witness);
    let at_witness = formula.instantiate(bound, &y);

    // P(y), u = y ⊢ P(u)
    let moved = rules::right_subst_eq(&rules::hypothesis(&at_witness), &y, &u, bound, formula)?;
    let moved = rules::cut(&tactics::eq_symmetry(&u, &y)?, &moved, &y.equals(&u))?;

    // P(y), (P(u) ∧ P(y)) ⇒ u = y ⊢ (u = y) ⇔ P(u)
    let instance = Formula::implies(
        Formula::and(vec![formula.clone(), at_witness.clone()]),
        u.equals(&y),
    );
    let characterized = Formula::iff(u.equals(&y), formula.clone());
    let step = rules::tautology(
        config,
        Sequent::new(vec![at_witness, instance.clone()], vec![characterized.clone()]),
        &[&moved],
    )?;

    let statement = uniqueness_statement(bound, formula);
    let elim = tactics::forall_elim_all(&statement, &[u.clone(), y.clone()])?;
    let step = rules::cut(&elim, &step, &instance)?;

    // uniqueness, ∃u. P ⊢ ∃y. ∀u. (u = y ⇔ P)
    let step = rules::right_forall(&step, bound, &characterized, bound)?;
    let all = Formula::forall(bound, characterized);
    let step = rules::right_exists(&step, &witness, &all, &y)?;
    let step = rules::left_exists(&step, bound, formula, &witness)?;
    let step = rules::right_exists_one(&step, bound, formula)?;

    let step = rules::cut(existence, &step, &Formula::exists(bound, formula.clone()))?;
    rules::cut(uniqueness, &step, &statement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::symbol::{FunctionSymbol, PredicateSymbol};

    fn config() -> CheckerConfig {
        CheckerConfig::default()
    }

    fn u() -> Variable {
        Variable::new("u")
    }

    // u = c
    fn is_c(term: Term) -> Formula {
        term.equals(&Term::constant(&FunctionSymbol::new("c", 0)))
    }

    #[test]
    fn test_exists_one_from_parts() {
        let c = Term::constant(&FunctionSymbol::new("c", 0));
        let formula = is_c(Term::from(&u()));

        // ⊢ ∃u. u = c
        let existence =
            rules::right_exists(&tactics::eq_refl(&c), &u(), &formula, &c).unwrap();

        // ⊢ ∀u. ∀v. ((u = c ∧ v = c) ⇒ u = v)
        let (v, body) = uniqueness_parts(&u(), &formula);
        let v_term = Term::from(&v);
        let chain = rules::cut(
            &tactics::eq_symmetry(&v_term, &c).unwrap(),
            &tactics::eq_transitivity(&Term::from(&u()), &c, &v_term).unwrap(),
            &c.equals(&v_term),
        )
        .unwrap();
        let body_thm = rules::tautology(&config(), Sequent::conclusion(body.clone()), &[&chain]).unwrap();
        let uniqueness = generalize_uniqueness(&body_thm, &u(), &formula).unwrap();
        assert_eq!(uniqueness.conclusion(), Some(&uniqueness_statement(&u(), &formula)));

        let result = exists_one_from_parts(&config(), &existence, &uniqueness, &u(), &formula).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::conclusion(Formula::exists_one(&u(), formula))
        );
    }

    #[test]
    fn test_substitute_exists_one_keeps_assumptions() {
        let a = Formula::predicate(&PredicateSymbol::new("A", 0), vec![]);
        let p = Formula::predicate(&PredicateSymbol::new("P", 1), vec![Term::from(&u())]);
        let q = Formula::predicate(&PredicateSymbol::new("Q", 1), vec![Term::from(&u())]);

        let existence = rules::hypothesis(&Formula::exists_one(&u(), p.clone()));
        let equivalence = tactics::generalize(
            &rules::hypothesis(&Formula::iff(p.clone(), q.clone())),
            &Formula::iff(p.clone(), q.clone()),
            &u(),
        );
        // u is free in the assumption, so generalizing is refused
        assert!(equivalence.is_err());

        let all = Formula::forall(&u(), Formula::iff(p.clone(), q.clone()));
        let equivalence = rules::weaken(&rules::hypothesis(&all), &[a.clone()], &[]);
        let result =
            substitute_exists_one(&config(), &existence, &equivalence, &u(), &p, &q).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::new(
                vec![Formula::exists_one(&u(), p), all, a],
                vec![Formula::exists_one(&u(), q)]
            )
        );
    }
}
