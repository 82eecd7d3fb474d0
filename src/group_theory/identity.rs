use tracing::debug;

use crate::description::{Description, DescriptionRequest};
use crate::group_theory::{part, term, var, GroupDefinitions};
use crate::kernel::error::ProofError;
use crate::kernel::formula::Formula;
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::term::Term;
use crate::kernel::theorem::Theorem;
use crate::lemmas;
use crate::library::LibraryError;
use crate::set_theory::SetTheory;
use crate::tactics;
use crate::theory::Theory;

/// The identity element of a group, as a description over (G, *).
#[derive(Clone, Debug)]
pub struct Identity {
    /// `group(G, *) ⊢ ∃!e. isNeutral(e, G, *)`
    pub uniqueness: Theorem,

    /// `identity(G, *)`
    pub description: Description,

    /// `group(G, *) ⊢ isNeutral(identity(G, *), G, *)`
    pub is_neutral: Theorem,

    /// `group(G, *) ⊢ (identity(G, *) = e) ⇔ isNeutral(e, G, *)`
    pub characterization: Theorem,
}

/// `group(G, *) ⊢ ∃!e. isNeutral(e, G, *)`
///
/// Existence is part of the group axioms. For uniqueness, if e and v are both neutral
/// then `e = op(e, v) = v`.
pub fn identity_uniqueness(
    theory: &Theory,
    sets: &SetTheory,
    definitions: &GroupDefinitions,
) -> Result<Theorem, ProofError> {
    let config = theory.config();
    let (g, star, e) = (term("G"), term("*"), term("e"));
    let args = [g.clone(), star.clone()];
    let group = definitions.group(&g, &star);
    let neutral = definitions.is_neutral(&e, &g, &star);

    let existence_formula = Formula::exists(&var("e"), neutral.clone());
    let existence = rules::tautology(
        config,
        Sequent::new(vec![group.clone()], vec![existence_formula]),
        &[
            &tactics::unfold(&definitions.group, &args),
            &tactics::unfold(&definitions.identity_existence, &args),
        ],
    )?;

    let (other, body) = lemmas::uniqueness_parts(&var("e"), &neutral);
    let v = Term::from(&other);
    let e_args = [e.clone(), g.clone(), star.clone()];
    let v_args = [v.clone(), g.clone(), star.clone()];
    let e_law = part(&definitions.is_neutral.expand(&e_args), 1)?;
    let v_law = part(&definitions.is_neutral.expand(&v_args), 1)?;
    let ev = sets.op(&e, &star, &v);
    let uniqueness = rules::tautology(
        config,
        Sequent::conclusion(body),
        &[
            &tactics::unfold(&definitions.is_neutral, &e_args),
            &tactics::unfold(&definitions.is_neutral, &v_args),
            &tactics::forall_elim(&e_law, &v)?,
            &tactics::forall_elim(&v_law, &e)?,
            &tactics::eq_symmetry(&ev, &e)?,
            &tactics::eq_transitivity(&e, &ev, &v)?,
        ],
    )?;
    let uniqueness = lemmas::generalize_uniqueness(&uniqueness, &var("e"), &neutral)?;
    lemmas::exists_one_from_parts(config, &existence, &uniqueness, &var("e"), &neutral)
}

impl Identity {
    pub fn build(
        theory: &mut Theory,
        sets: &SetTheory,
        definitions: &GroupDefinitions,
    ) -> Result<Identity, LibraryError> {
        let uniqueness = identity_uniqueness(theory, sets, definitions)?;
        let uniqueness = theory.record("identity_uniqueness", uniqueness)?;
        let neutral = definitions.is_neutral(&term("e"), &term("G"), &term("*"));
        let description = theory.describe(DescriptionRequest::new(
            "identity",
            vec![var("G"), var("*")],
            var("e"),
            neutral,
            uniqueness.clone(),
        ))?;
        if let Some(premise) = description.premise() {
            debug!(premise = %premise, "identity is conditional");
        }
        theory.record("identity_definition", description.definition_theorem().clone())?;
        let is_neutral = theory.record("identity_is_neutral", description.satisfies()?)?;
        let characterization =
            theory.record("identity_characterization", description.characterization()?)?;
        theory.record("identity_fallback", description.fallback()?)?;
        Ok(Identity {
            uniqueness,
            description,
            is_neutral,
            characterization,
        })
    }

    /// `identity(G, *)`
    pub fn apply(&self, g: &Term, star: &Term) -> Term {
        self.description.apply(vec![g.clone(), star.clone()])
    }
}
