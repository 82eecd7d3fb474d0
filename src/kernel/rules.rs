//! The primitive inference rules.
//!
//! Every rule computes its conclusion from its premises and parameters, checks its side
//! conditions, and returns either a new theorem or a `ProofError` naming the rule.

use crate::checker::{Checker, CheckerConfig};
use crate::kernel::error::{ProofError, Result};
use crate::kernel::formula::Formula;
use crate::kernel::sequent::Sequent;
use crate::kernel::substitution::Substitution;
use crate::kernel::term::{Term, Variable};
use crate::kernel::theorem::Theorem;
use crate::proof_step::Rule;

fn require(condition: bool, rule: &'static str, message: impl FnOnce() -> String) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ProofError::rejected(rule, message()))
    }
}

fn require_right(theorem: &Theorem, formula: &Formula, rule: &'static str) -> Result<()> {
    require(theorem.sequent().contains_right(formula), rule, || {
        format!("{} is not a conclusion of {}", formula, theorem)
    })
}

fn require_left(theorem: &Theorem, formula: &Formula, rule: &'static str) -> Result<()> {
    require(theorem.sequent().contains_left(formula), rule, || {
        format!("{} is not an assumption of {}", formula, theorem)
    })
}

// The eigenvariable must not occur free anywhere in the conclusion.
fn require_eigenvariable(
    variable: &Variable,
    left: &[Formula],
    right: &[Formula],
    quantified: &Formula,
    rule: &'static str,
) -> Result<()> {
    for f in left.iter().chain(right.iter()).chain(std::iter::once(quantified)) {
        if f.has_free(variable) {
            return Err(ProofError::rejected(
                rule,
                format!("eigenvariable {} occurs free in {}", variable, f),
            ));
        }
    }
    Ok(())
}

/// `φ ⊢ φ`
pub fn hypothesis(formula: &Formula) -> Theorem {
    Theorem::leaf(
        Sequent::new(vec![formula.clone()], vec![formula.clone()]),
        Rule::Hypothesis,
    )
}

/// Adds formulas to either side.
pub fn weaken(theorem: &Theorem, left: &[Formula], right: &[Formula]) -> Theorem {
    let sequent = Sequent::new(
        theorem.assumptions().iter().chain(left).cloned(),
        theorem.conclusions().iter().chain(right).cloned(),
    );
    Theorem::infer(sequent, Rule::Weakening, theorem)
}

/// From `Γ ⊢ φ, Δ` and `Σ, φ ⊢ Π`, concludes `Γ, Σ ⊢ Δ, Π`.
pub fn cut(first: &Theorem, second: &Theorem, formula: &Formula) -> Result<Theorem> {
    require_right(first, formula, "cut")?;
    require_left(second, formula, "cut")?;
    let sequent = Sequent::new(
        first
            .assumptions()
            .iter()
            .cloned()
            .chain(second.sequent().left_without(formula)),
        first
            .sequent()
            .right_without(formula)
            .into_iter()
            .chain(second.conclusions().iter().cloned()),
    );
    Theorem::combine(
        "cut",
        sequent,
        Rule::Cut(formula.clone()),
        vec![first.clone(), second.clone()],
    )
}

/// From `Γ ⊢ φ, Δ`, concludes `Γ, ¬φ ⊢ Δ`.
pub fn left_not(theorem: &Theorem, formula: &Formula) -> Result<Theorem> {
    require_right(theorem, formula, "left not")?;
    let negation = formula.negate();
    let sequent = Sequent::new(
        theorem.assumptions().iter().cloned().chain([negation.clone()]),
        theorem.sequent().right_without(formula),
    );
    Ok(Theorem::infer(sequent, Rule::LeftNot(negation), theorem))
}

/// From `Γ, φ ⊢ Δ`, concludes `Γ ⊢ ¬φ, Δ`.
pub fn right_not(theorem: &Theorem, formula: &Formula) -> Result<Theorem> {
    require_left(theorem, formula, "right not")?;
    let negation = formula.negate();
    let sequent = Sequent::new(
        theorem.sequent().left_without(formula),
        theorem.conclusions().iter().cloned().chain([negation.clone()]),
    );
    Ok(Theorem::infer(sequent, Rule::RightNot(negation), theorem))
}

/// From `Γ, φ₁, …, φₙ ⊢ Δ`, concludes `Γ, φ₁ ∧ … ∧ φₙ ⊢ Δ`.
/// Conjuncts missing from the premise are allowed; they weaken the conclusion.
pub fn left_and(theorem: &Theorem, conjuncts: &[Formula]) -> Theorem {
    let conjunction = Formula::and(conjuncts.to_vec());
    let left = theorem
        .assumptions()
        .iter()
        .filter(|f| !conjuncts.contains(f))
        .cloned()
        .chain([conjunction.clone()]);
    let sequent = Sequent::new(left, theorem.conclusions().iter().cloned());
    Theorem::infer(sequent, Rule::LeftAnd(conjunction), theorem)
}

/// From `Γᵢ ⊢ φᵢ, Δᵢ` for each i, concludes `Γ₁, …, Γₙ ⊢ φ₁ ∧ … ∧ φₙ, Δ₁, …, Δₙ`.
pub fn right_and(theorems: &[&Theorem], conjuncts: &[Formula]) -> Result<Theorem> {
    require(theorems.len() == conjuncts.len(), "right and", || {
        format!("{} premises for {} conjuncts", theorems.len(), conjuncts.len())
    })?;
    let conjunction = Formula::and(conjuncts.to_vec());
    let mut sequent = Sequent::default();
    for (theorem, conjunct) in theorems.iter().zip(conjuncts) {
        require_right(theorem, conjunct, "right and")?;
        for f in theorem.assumptions() {
            sequent.add_left(f.clone());
        }
        for f in theorem.sequent().right_without(conjunct) {
            sequent.add_right(f);
        }
    }
    sequent.add_right(conjunction.clone());
    Theorem::combine(
        "right and",
        sequent,
        Rule::RightAnd(conjunction),
        theorems.iter().map(|t| (*t).clone()).collect(),
    )
}

/// From `Γᵢ, φᵢ ⊢ Δᵢ` for each i, concludes `Γ₁, …, Γₙ, φ₁ ∨ … ∨ φₙ ⊢ Δ₁, …, Δₙ`.
/// This is reasoning by cases.
pub fn left_or(theorems: &[&Theorem], disjuncts: &[Formula]) -> Result<Theorem> {
    require(theorems.len() == disjuncts.len(), "left or", || {
        format!("{} premises for {} disjuncts", theorems.len(), disjuncts.len())
    })?;
    let disjunction = Formula::or(disjuncts.to_vec());
    let mut sequent = Sequent::default();
    for (theorem, disjunct) in theorems.iter().zip(disjuncts) {
        require_left(theorem, disjunct, "left or")?;
        for f in theorem.sequent().left_without(disjunct) {
            sequent.add_left(f);
        }
        for f in theorem.conclusions() {
            sequent.add_right(f.clone());
        }
    }
    sequent.add_left(disjunction.clone());
    Theorem::combine(
        "left or",
        sequent,
        Rule::LeftOr(disjunction),
        theorems.iter().map(|t| (*t).clone()).collect(),
    )
}

/// From `Γ ⊢ φ₁, …, φₙ, Δ`, concludes `Γ ⊢ φ₁ ∨ … ∨ φₙ, Δ`.
pub fn right_or(theorem: &Theorem, disjuncts: &[Formula]) -> Theorem {
    let disjunction = Formula::or(disjuncts.to_vec());
    let right = theorem
        .conclusions()
        .iter()
        .filter(|f| !disjuncts.contains(f))
        .cloned()
        .chain([disjunction.clone()]);
    let sequent = Sequent::new(theorem.assumptions().iter().cloned(), right);
    Theorem::infer(sequent, Rule::RightOr(disjunction), theorem)
}

/// From `Γ ⊢ φ, Δ` and `Σ, ψ ⊢ Π`, concludes `Γ, Σ, φ ⇒ ψ ⊢ Δ, Π`.
pub fn left_implies(
    first: &Theorem,
    second: &Theorem,
    antecedent: &Formula,
    consequent: &Formula,
) -> Result<Theorem> {
    require_right(first, antecedent, "left implies")?;
    require_left(second, consequent, "left implies")?;
    let implication = Formula::implies(antecedent.clone(), consequent.clone());
    let sequent = Sequent::new(
        first
            .assumptions()
            .iter()
            .cloned()
            .chain(second.sequent().left_without(consequent))
            .chain([implication.clone()]),
        first
            .sequent()
            .right_without(antecedent)
            .into_iter()
            .chain(second.conclusions().iter().cloned()),
    );
    Theorem::combine(
        "left implies",
        sequent,
        Rule::LeftImplies(implication),
        vec![first.clone(), second.clone()],
    )
}

/// From `Γ, φ ⊢ ψ, Δ`, concludes `Γ ⊢ φ ⇒ ψ, Δ`.
pub fn right_implies(theorem: &Theorem, antecedent: &Formula, consequent: &Formula) -> Result<Theorem> {
    require_right(theorem, consequent, "right implies")?;
    let implication = Formula::implies(antecedent.clone(), consequent.clone());
    let sequent = Sequent::new(
        theorem.sequent().left_without(antecedent),
        theorem
            .sequent()
            .right_without(consequent)
            .into_iter()
            .chain([implication.clone()]),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::RightImplies(implication),
        theorem,
    ))
}

/// From `Γ, φ ⇒ ψ, ψ ⇒ φ ⊢ Δ`, concludes `Γ, φ ⇔ ψ ⊢ Δ`.
/// Either implication may be missing from the premise.
pub fn left_iff(theorem: &Theorem, left: &Formula, right: &Formula) -> Theorem {
    let forward = Formula::implies(left.clone(), right.clone());
    let backward = Formula::implies(right.clone(), left.clone());
    let equivalence = Formula::iff(left.clone(), right.clone());
    let assumptions = theorem
        .assumptions()
        .iter()
        .filter(|f| **f != forward && **f != backward)
        .cloned()
        .chain([equivalence.clone()]);
    let sequent = Sequent::new(assumptions, theorem.conclusions().iter().cloned());
    Theorem::infer(sequent, Rule::LeftIff(equivalence), theorem)
}

/// From `Γ ⊢ φ ⇒ ψ, Δ` and `Σ ⊢ ψ ⇒ φ, Π`, concludes `Γ, Σ ⊢ φ ⇔ ψ, Δ, Π`.
pub fn right_iff(
    forward: &Theorem,
    backward: &Theorem,
    left: &Formula,
    right: &Formula,
) -> Result<Theorem> {
    let forward_formula = Formula::implies(left.clone(), right.clone());
    let backward_formula = Formula::implies(right.clone(), left.clone());
    require_right(forward, &forward_formula, "right iff")?;
    require_right(backward, &backward_formula, "right iff")?;
    let equivalence = Formula::iff(left.clone(), right.clone());
    let sequent = Sequent::new(
        forward
            .assumptions()
            .iter()
            .chain(backward.assumptions())
            .cloned(),
        forward
            .sequent()
            .right_without(&forward_formula)
            .into_iter()
            .chain(backward.sequent().right_without(&backward_formula))
            .chain([equivalence.clone()]),
    );
    Theorem::combine(
        "right iff",
        sequent,
        Rule::RightIff(equivalence),
        vec![forward.clone(), backward.clone()],
    )
}

/// From `Γ, φ[t/x] ⊢ Δ`, concludes `Γ, ∀x. φ ⊢ Δ`.
pub fn left_forall(theorem: &Theorem, variable: &Variable, body: &Formula, term: &Term) -> Result<Theorem> {
    let instance = body.instantiate(variable, term);
    require_left(theorem, &instance, "left forall")?;
    let quantified = Formula::forall(variable, body.clone());
    let sequent = Sequent::new(
        theorem
            .sequent()
            .left_without(&instance)
            .into_iter()
            .chain([quantified.clone()]),
        theorem.conclusions().iter().cloned(),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::LeftForall(quantified, term.clone()),
        theorem,
    ))
}

/// From `Γ ⊢ φ[y/x], Δ` with `y` not free in `Γ`, `Δ` or `∀x. φ`, concludes `Γ ⊢ ∀x. φ, Δ`.
pub fn right_forall(
    theorem: &Theorem,
    variable: &Variable,
    body: &Formula,
    eigenvariable: &Variable,
) -> Result<Theorem> {
    let instance = body.instantiate(variable, &Term::from(eigenvariable));
    require_right(theorem, &instance, "right forall")?;
    let quantified = Formula::forall(variable, body.clone());
    let rest = theorem.sequent().right_without(&instance);
    require_eigenvariable(
        eigenvariable,
        theorem.assumptions(),
        &rest,
        &quantified,
        "right forall",
    )?;
    let sequent = Sequent::new(
        theorem.assumptions().iter().cloned(),
        rest.into_iter().chain([quantified.clone()]),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::RightForall(quantified, eigenvariable.clone()),
        theorem,
    ))
}

/// From `Γ, φ[y/x] ⊢ Δ` with `y` not free in `Γ`, `Δ` or `∃x. φ`, concludes `Γ, ∃x. φ ⊢ Δ`.
pub fn left_exists(
    theorem: &Theorem,
    variable: &Variable,
    body: &Formula,
    eigenvariable: &Variable,
) -> Result<Theorem> {
    let instance = body.instantiate(variable, &Term::from(eigenvariable));
    require_left(theorem, &instance, "left exists")?;
    let quantified = Formula::exists(variable, body.clone());
    let rest = theorem.sequent().left_without(&instance);
    require_eigenvariable(
        eigenvariable,
        &rest,
        theorem.conclusions(),
        &quantified,
        "left exists",
    )?;
    let sequent = Sequent::new(
        rest.into_iter().chain([quantified.clone()]),
        theorem.conclusions().iter().cloned(),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::LeftExists(quantified, eigenvariable.clone()),
        theorem,
    ))
}

/// From `Γ ⊢ φ[t/x], Δ`, concludes `Γ ⊢ ∃x. φ, Δ`.
pub fn right_exists(theorem: &Theorem, variable: &Variable, body: &Formula, term: &Term) -> Result<Theorem> {
    let instance = body.instantiate(variable, term);
    require_right(theorem, &instance, "right exists")?;
    let quantified = Formula::exists(variable, body.clone());
    let sequent = Sequent::new(
        theorem.assumptions().iter().cloned(),
        theorem
            .sequent()
            .right_without(&instance)
            .into_iter()
            .chain([quantified.clone()]),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::RightExists(quantified, term.clone()),
        theorem,
    ))
}

/// From `Γ, ∃y. ∀x. ((x = y) ⇔ φ) ⊢ Δ`, concludes `Γ, ∃!x. φ ⊢ Δ`.
pub fn left_exists_one(theorem: &Theorem, variable: &Variable, body: &Formula) -> Result<Theorem> {
    let unfolded = Formula::unfold_exists_one(variable, body);
    require_left(theorem, &unfolded, "left exists one")?;
    let folded = Formula::exists_one(variable, body.clone());
    let sequent = Sequent::new(
        theorem
            .sequent()
            .left_without(&unfolded)
            .into_iter()
            .chain([folded.clone()]),
        theorem.conclusions().iter().cloned(),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::LeftExistsOne(folded),
        theorem,
    ))
}

/// From `Γ ⊢ ∃y. ∀x. ((x = y) ⇔ φ), Δ`, concludes `Γ ⊢ ∃!x. φ, Δ`.
pub fn right_exists_one(theorem: &Theorem, variable: &Variable, body: &Formula) -> Result<Theorem> {
    let unfolded = Formula::unfold_exists_one(variable, body);
    require_right(theorem, &unfolded, "right exists one")?;
    let folded = Formula::exists_one(variable, body.clone());
    let sequent = Sequent::new(
        theorem.assumptions().iter().cloned(),
        theorem
            .sequent()
            .right_without(&unfolded)
            .into_iter()
            .chain([folded.clone()]),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::RightExistsOne(folded),
        theorem,
    ))
}

/// `⊢ t = t`
pub fn right_refl(term: &Term) -> Theorem {
    Theorem::leaf(
        Sequent::conclusion(term.equals(term)),
        Rule::Reflexivity(term.clone()),
    )
}

/// From `Γ ⊢ φ[s/z], Δ`, concludes `Γ, s = t ⊢ φ[t/z], Δ`.
pub fn right_subst_eq(
    theorem: &Theorem,
    s: &Term,
    t: &Term,
    variable: &Variable,
    body: &Formula,
) -> Result<Theorem> {
    let before = body.instantiate(variable, s);
    let after = body.instantiate(variable, t);
    require_right(theorem, &before, "right substitution")?;
    let equation = s.equals(t);
    let sequent = Sequent::new(
        theorem.assumptions().iter().cloned().chain([equation.clone()]),
        theorem
            .sequent()
            .right_without(&before)
            .into_iter()
            .chain([after]),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::RightSubstitution(equation),
        theorem,
    ))
}

/// From `Γ, φ[s/z] ⊢ Δ`, concludes `Γ, s = t, φ[t/z] ⊢ Δ`.
pub fn left_subst_eq(
    theorem: &Theorem,
    s: &Term,
    t: &Term,
    variable: &Variable,
    body: &Formula,
) -> Result<Theorem> {
    let before = body.instantiate(variable, s);
    let after = body.instantiate(variable, t);
    require_left(theorem, &before, "left substitution")?;
    let equation = s.equals(t);
    let sequent = Sequent::new(
        theorem
            .sequent()
            .left_without(&before)
            .into_iter()
            .chain([equation.clone(), after]),
        theorem.conclusions().iter().cloned(),
    );
    Ok(Theorem::infer(
        sequent,
        Rule::LeftSubstitution(equation),
        theorem,
    ))
}

/// Replaces free variables throughout a theorem, simultaneously and without capture.
/// Free variables of a theorem are implicitly universally quantified, so any instance holds.
pub fn instantiate(theorem: &Theorem, substitution: &Substitution) -> Theorem {
    if substitution.is_empty() {
        return theorem.clone();
    }
    Theorem::infer(
        theorem.sequent().substitute(substitution),
        Rule::Instantiation(substitution.clone()),
        theorem,
    )
}

/// Concludes `goal` if it follows propositionally from the premises.
pub fn tautology(config: &CheckerConfig, goal: Sequent, premises: &[&Theorem]) -> Result<Theorem> {
    let mut checker = Checker::new(*config);
    let sequents: Vec<&Sequent> = premises.iter().map(|t| t.sequent()).collect();
    match checker.check(&sequents, &goal) {
        Some(true) => Theorem::combine(
            "tautology",
            goal,
            Rule::Tautology,
            premises.iter().map(|t| (*t).clone()).collect(),
        ),
        Some(false) => Err(ProofError::rejected(
            "tautology",
            format!("{} does not follow propositionally from {} premises", goal, premises.len()),
        )),
        None => Err(ProofError::TooManyAtoms {
            rule: "tautology",
            atoms: checker.num_atoms(),
            limit: config.max_atoms,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::symbol::PredicateSymbol;

    fn p(term: Term) -> Formula {
        Formula::predicate(&PredicateSymbol::new("P", 1), vec![term])
    }

    fn atom(name: &str) -> Formula {
        Formula::predicate(&PredicateSymbol::new(name, 0), vec![])
    }

    fn x() -> Variable {
        Variable::new("x")
    }

    #[test]
    fn test_cut_combines_sides() {
        let a = atom("A");
        let b = atom("B");
        let first = weaken(&hypothesis(&a), &[], &[]);
        let ab = tautology(
            &CheckerConfig::default(),
            Sequent::new(vec![a.clone(), a.clone() >> b.clone()], vec![b.clone()]),
            &[],
        )
        .unwrap();
        let result = cut(&first, &ab, &a).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::new(vec![a.clone(), a >> b.clone()], vec![b])
        );
    }

    #[test]
    fn test_cut_requires_cut_formula() {
        let a = atom("A");
        let b = atom("B");
        let err = cut(&hypothesis(&a), &hypothesis(&b), &b).unwrap_err();
        assert_eq!(err.rule(), Some("cut"));
    }

    #[test]
    fn test_right_forall_checks_eigenvariable() {
        // P(x) ⊢ P(x) must not generalize to P(x) ⊢ ∀x. P(x)
        let px = p(Term::var("x"));
        let err = right_forall(&hypothesis(&px), &x(), &px, &x()).unwrap_err();
        assert_eq!(err.rule(), Some("right forall"));

        // ⊢ x = x generalizes fine
        let refl = right_refl(&Term::var("x"));
        let eq = Term::var("x").equals(&Term::var("x"));
        let general = right_forall(&refl, &x(), &eq, &x()).unwrap();
        assert_eq!(general.conclusion(), Some(&Formula::forall(&x(), eq)));
    }

    #[test]
    fn test_left_exists_checks_eigenvariable() {
        let px = p(Term::var("x"));
        let ok = left_exists(&hypothesis(&px), &x(), &px, &x());
        assert!(ok.is_err());

        let thm = tautology(
            &CheckerConfig::default(),
            Sequent::new(vec![px.clone()], vec![px.clone() | atom("A")]),
            &[],
        )
        .unwrap();
        assert!(left_exists(&thm, &x(), &px, &x()).is_err());
        let weaker = right_exists(&hypothesis(&px), &x(), &px, &Term::var("x")).unwrap();
        let folded = left_exists(&weaker, &x(), &px, &x()).unwrap();
        let exists = Formula::exists(&x(), px);
        assert_eq!(
            folded.sequent(),
            &Sequent::new(vec![exists.clone()], vec![exists])
        );
    }

    #[test]
    fn test_left_forall_instantiates() {
        let y = Term::var("y");
        let thm = hypothesis(&p(y.clone()));
        let result = left_forall(&thm, &x(), &p(Term::var("x")), &y).unwrap();
        let all = Formula::forall(&x(), p(Term::var("x")));
        assert_eq!(result.sequent(), &Sequent::new(vec![all], vec![p(y)]));
    }

    #[test]
    fn test_substitution_of_equals() {
        // ⊢ a = a becomes a = b ⊢ b = a
        let a = Term::var("a");
        let b = Term::var("b");
        let z = Variable::new("z");
        let body = Term::from(&z).equals(&a);
        let result = right_subst_eq(&right_refl(&a), &a, &b, &z, &body).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::new(vec![a.equals(&b)], vec![b.equals(&a)])
        );
    }

    #[test]
    fn test_exists_one_folding() {
        let px = p(Term::var("x"));
        let unfolded = Formula::unfold_exists_one(&x(), &px);
        let folded = right_exists_one(&hypothesis(&unfolded), &x(), &px).unwrap();
        let folded = left_exists_one(&folded, &x(), &px).unwrap();
        let unique = Formula::exists_one(&x(), px);
        assert_eq!(
            folded.sequent(),
            &Sequent::new(vec![unique.clone()], vec![unique])
        );
    }

    #[test]
    fn test_tautology_rejects_non_tautology() {
        let goal = Sequent::conclusion(atom("A"));
        let err = tautology(&CheckerConfig::default(), goal, &[]).unwrap_err();
        assert_eq!(err.rule(), Some("tautology"));
    }

    #[test]
    fn test_instantiate_avoids_capture() {
        let y = Variable::new("y");
        let q = PredicateSymbol::new("Q", 2);
        let all = Formula::forall(&y, Formula::predicate(&q, vec![Term::var("x"), Term::var("y")]));
        let inst = instantiate(&hypothesis(&all), &Substitution::single(&x(), &Term::var("y")));
        let captured = Formula::forall(&y, Formula::predicate(&q, vec![Term::var("y"), Term::var("y")]));
        let conclusion = inst.conclusion().unwrap();
        assert_ne!(conclusion, &captured);
        assert!(conclusion.has_free(&y));
        assert!(inst.sequent().contains_left(conclusion));
    }

    #[test]
    fn test_left_or_cases() {
        let a = atom("A");
        let b = atom("B");
        let c = atom("C");
        let config = CheckerConfig::default();
        let from_a = tautology(&config, Sequent::new(vec![a.clone(), a.clone() >> c.clone()], vec![c.clone()]), &[]).unwrap();
        let from_b = tautology(&config, Sequent::new(vec![b.clone(), b.clone() >> c.clone()], vec![c.clone()]), &[]).unwrap();
        let result = left_or(&[&from_a, &from_b], &[a.clone(), b.clone()]).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::new(
                vec![a.clone() >> c.clone(), b.clone() >> c.clone(), a | b],
                vec![c]
            )
        );
    }

    #[test]
    fn test_left_not() {
        let (a, b) = (atom("A"), atom("B"));
        let result = left_not(&hypothesis(&a), &a).unwrap();
        assert_eq!(result.sequent(), &Sequent::new(vec![a.clone(), a.negate()], vec![]));
        assert_eq!(left_not(&hypothesis(&a), &b).unwrap_err().rule(), Some("left not"));
    }

    #[test]
    fn test_right_not() {
        let (a, b) = (atom("A"), atom("B"));
        let result = right_not(&hypothesis(&a), &a).unwrap();
        assert_eq!(result.sequent(), &Sequent::new(vec![], vec![a.clone(), a.negate()]));
        assert_eq!(right_not(&hypothesis(&a), &b).unwrap_err().rule(), Some("right not"));
    }

    #[test]
    fn test_left_and() {
        let (a, b, c) = (atom("A"), atom("B"), atom("C"));
        let both = weaken(&hypothesis(&a), &[b.clone()], &[]);
        let result = left_and(&both, &[a.clone(), b.clone()]);
        assert_eq!(
            result.sequent(),
            &Sequent::new(vec![a.clone() & b], vec![a.clone()])
        );

        // A conjunct that was not assumed only weakens
        let result = left_and(&hypothesis(&a), &[a.clone(), c.clone()]);
        assert_eq!(result.sequent(), &Sequent::new(vec![a.clone() & c], vec![a]));
    }

    #[test]
    fn test_left_implies() {
        let (a, b) = (atom("A"), atom("B"));
        let result = left_implies(&hypothesis(&a), &hypothesis(&b), &a, &b).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::new(vec![a.clone(), a.clone() >> b.clone()], vec![b.clone()])
        );
        let err = left_implies(&hypothesis(&a), &hypothesis(&b), &b, &b).unwrap_err();
        assert_eq!(err.rule(), Some("left implies"));
        let err = left_implies(&hypothesis(&a), &hypothesis(&b), &a, &a).unwrap_err();
        assert_eq!(err.rule(), Some("left implies"));
    }

    #[test]
    fn test_right_implies() {
        let (a, b) = (atom("A"), atom("B"));
        let premise = weaken(&hypothesis(&b), &[a.clone()], &[]);
        let result = right_implies(&premise, &a, &b).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::new(vec![b.clone()], vec![a.clone() >> b.clone()])
        );
        let err = right_implies(&hypothesis(&a), &a, &b).unwrap_err();
        assert_eq!(err.rule(), Some("right implies"));
    }

    #[test]
    fn test_left_iff() {
        let (a, b) = (atom("A"), atom("B"));
        let forward = a.clone() >> b.clone();
        let backward = b.clone() >> a.clone();
        let premise = weaken(&hypothesis(&forward), &[backward], &[]);
        let result = left_iff(&premise, &a, &b);
        assert_eq!(
            result.sequent(),
            &Sequent::new(vec![Formula::iff(a, b)], vec![forward])
        );
    }

    #[test]
    fn test_right_iff() {
        let (a, b) = (atom("A"), atom("B"));
        // B ⊢ A ⇒ B and A ⊢ B ⇒ A
        let forward = right_implies(&weaken(&hypothesis(&b), &[a.clone()], &[]), &a, &b).unwrap();
        let backward = right_implies(&weaken(&hypothesis(&a), &[b.clone()], &[]), &b, &a).unwrap();
        let result = right_iff(&forward, &backward, &a, &b).unwrap();
        assert_eq!(
            result.sequent(),
            &Sequent::new(vec![a.clone(), b.clone()], vec![Formula::iff(a.clone(), b.clone())])
        );

        // The implications in the wrong order prove nothing
        let err = right_iff(&backward, &forward, &a, &b).unwrap_err();
        assert_eq!(err.rule(), Some("right iff"));
    }
}
