//! The fragment of set theory the group layer is stated in.
//!
//! Functions are sets of pairs. `app(f, x)` is the unique z with `pair(x, z) ∈ f`, when `f` is
//! functional and `x` is in its domain, and the empty set otherwise.

use tracing::debug;

use crate::description::{Description, DescriptionRequest};
use crate::kernel::error::ProofError;
use crate::kernel::formula::Formula;
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::signature::PredicateDefinition;
use crate::kernel::substitution::Substitution;
use crate::kernel::symbol::{FunctionSymbol, PredicateSymbol};
use crate::kernel::term::{Term, Variable};
use crate::kernel::theorem::Theorem;
use crate::library::LibraryError;
use crate::theory::Theory;

fn var(name: &str) -> Variable {
    Variable::new(name)
}

fn term(name: &str) -> Term {
    Term::var(name)
}

#[derive(Clone, Debug)]
pub struct SetTheory {
    pub member: PredicateSymbol,
    pub functional: PredicateSymbol,
    pub relation_domain: FunctionSymbol,
    pub pair: FunctionSymbol,
    pub cartesian_product: FunctionSymbol,
    pub restricted_function: FunctionSymbol,

    /// `⊢ (functional(f) ∧ x ∈ relationDomain(f)) ⇒ ∃!z. pair(x, z) ∈ f`
    pub application_uniqueness: Theorem,

    /// `⊢ p ∈ restrictedFunction(f, d) ⇒ p ∈ f`
    pub restriction_edges: Theorem,

    pub subset: PredicateDefinition,

    /// `app(f, x)`, a conditional description.
    pub app: Description,
}

impl SetTheory {
    /// Declares the vocabulary, asserts the axioms, and defines `subset` and `app`.
    pub fn build(theory: &mut Theory) -> Result<SetTheory, LibraryError> {
        let member = theory.declare_predicate("∈", 2)?;
        let functional = theory.declare_predicate("functional", 1)?;
        let relation_domain = theory.declare_function("relationDomain", 1)?;
        let pair = theory.declare_function("pair", 2)?;
        let cartesian_product = theory.declare_function("cartesianProduct", 2)?;
        let restricted_function = theory.declare_function("restrictedFunction", 2)?;

        let (f, x, z, p, d) = (term("f"), term("x"), term("z"), term("p"), term("d"));
        let is_member = |a: Term, b: Term| Formula::predicate(&member, vec![a, b]);
        let domain_premise = Formula::and(vec![
            Formula::predicate(&functional, vec![f.clone()]),
            is_member(x.clone(), Term::apply(&relation_domain, vec![f.clone()])),
        ]);
        let edge = is_member(Term::apply(&pair, vec![x.clone(), z.clone()]), f.clone());
        let application_uniqueness = theory.axiom(
            "application_uniqueness",
            Formula::implies(domain_premise.clone(), Formula::exists_one(&var("z"), edge.clone())),
        )?;
        let restriction_edges = theory.axiom(
            "restriction_edges",
            Formula::implies(
                is_member(p.clone(), Term::apply(&restricted_function, vec![f.clone(), d])),
                is_member(p, f.clone()),
            ),
        )?;

        let (a, b) = (term("A"), term("B"));
        let subset = theory.define_predicate(
            "subset",
            &[var("A"), var("B")],
            Formula::forall(
                &var("z"),
                Formula::implies(is_member(z.clone(), a), is_member(z, b)),
            ),
        )?;
        theory.record("subset_definition", subset.theorem().clone())?;

        // functional(f), x ∈ relationDomain(f) ⊢ ∃!z. pair(x, z) ∈ f
        let justification = rules::tautology(
            theory.config(),
            Sequent::new(
                domain_premise.conjuncts().into_iter().cloned(),
                vec![Formula::exists_one(&var("z"), edge.clone())],
            ),
            &[&application_uniqueness],
        )?;
        let app = theory.describe(DescriptionRequest::new(
            "app",
            vec![var("f"), var("x")],
            var("z"),
            edge,
            justification,
        ))?;
        debug!(definition = %app.complete_definition(), "app");
        theory.record("app_unique", app.justification().clone())?;
        theory.record("app_definition", app.definition_theorem().clone())?;
        theory.record("app_characterization", app.characterization()?)?;
        theory.record("app_satisfies", app.satisfies()?)?;
        theory.record("app_fallback", app.fallback()?)?;

        Ok(SetTheory {
            member,
            functional,
            relation_domain,
            pair,
            cartesian_product,
            restricted_function,
            application_uniqueness,
            restriction_edges,
            subset,
            app,
        })
    }

    /// `a ∈ b`
    pub fn member(&self, a: &Term, b: &Term) -> Formula {
        Formula::predicate(&self.member, vec![a.clone(), b.clone()])
    }

    pub fn functional(&self, f: &Term) -> Formula {
        Formula::predicate(&self.functional, vec![f.clone()])
    }

    pub fn relation_domain(&self, f: &Term) -> Term {
        Term::apply(&self.relation_domain, vec![f.clone()])
    }

    pub fn pair(&self, a: &Term, b: &Term) -> Term {
        Term::apply(&self.pair, vec![a.clone(), b.clone()])
    }

    pub fn cartesian_product(&self, a: &Term, b: &Term) -> Term {
        Term::apply(&self.cartesian_product, vec![a.clone(), b.clone()])
    }

    pub fn restricted_function(&self, f: &Term, domain: &Term) -> Term {
        Term::apply(&self.restricted_function, vec![f.clone(), domain.clone()])
    }

    pub fn subset(&self, a: &Term, b: &Term) -> Formula {
        self.subset.apply(vec![a.clone(), b.clone()])
    }

    /// `app(f, x)`
    pub fn app(&self, f: &Term, x: &Term) -> Term {
        self.app.apply(vec![f.clone(), x.clone()])
    }

    /// `op(x, *, y)`, which is `app(*, pair(x, y))`
    pub fn op(&self, x: &Term, star: &Term, y: &Term) -> Term {
        self.app(star, &self.pair(x, y))
    }

    /// `functional(f) ∧ x ∈ relationDomain(f) ⊢ pair(x, app(f, x)) ∈ f`, for any f and x.
    pub fn application_edge(&self, f: &Term, x: &Term) -> Result<Theorem, ProofError> {
        let general = self.app.satisfies()?;
        Ok(rules::instantiate(
            &general,
            &Substitution::from_pairs(vec![(var("f"), f.clone()), (var("x"), x.clone())]),
        ))
    }
}
