use tracing::debug;

use crate::description::{Description, DescriptionRequest};
use crate::group_theory::{part, restate, term, var, GroupDefinitions, Identity};
use crate::kernel::error::ProofError;
use crate::kernel::formula::Formula;
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::substitution::Substitution;
use crate::kernel::term::Term;
use crate::kernel::theorem::Theorem;
use crate::lemmas;
use crate::library::LibraryError;
use crate::set_theory::SetTheory;
use crate::tactics;
use crate::theory::Theory;

/// The inverse of an element, as a description over (x, G, *).
#[derive(Clone, Debug)]
pub struct Inverse {
    /// `group(G, *), x ∈ G ⊢ ∃!y. isInverse(y, x, G, *)`
    pub uniqueness: Theorem,

    /// `inverse(x, G, *)`
    pub description: Description,

    /// `group(G, *), x ∈ G ⊢ isInverse(inverse(x, G, *), x, G, *)`
    pub is_inverse: Theorem,

    /// `group(G, *), x ∈ G ⊢ (inverse(x, G, *) = y) ⇔ isInverse(y, x, G, *)`
    pub characterization: Theorem,

    /// `x ∈ G, isInverse(y, x, G, *) ⊢ isInverse(x, y, G, *)`
    pub symmetry: Theorem,

    /// `group(G, *), x ∈ G ⊢ inverse(inverse(x, G, *), G, *) = x`
    pub involution: Theorem,

    /// `group(G, *), x ∈ G ⊢ op(x, *, inverse(x)) = identity(G, *) ∧ op(inverse(x), *, x) = identity(G, *)`
    pub cancellation: Theorem,
}

/// `group(G, *), x ∈ G ⊢ ∃!y. isInverse(y, x, G, *)`
///
/// If y and v are both inverses of x, then `v = (y * x) * v = y * (x * v) = y`.
pub fn inverse_uniqueness(
    theory: &Theory,
    sets: &SetTheory,
    definitions: &GroupDefinitions,
) -> Result<Theorem, ProofError> {
    let config = theory.config();
    let (g, star, x, y) = (term("G"), term("*"), term("x"), term("y"));
    let args = [g.clone(), star.clone()];
    let op = |a: &Term, b: &Term| sets.op(a, &star, b);
    let assumptions = vec![definitions.group(&g, &star), sets.member(&x, &g)];
    let inverse_of_x = definitions.is_inverse(&y, &x, &g, &star);

    let existence_law = definitions.inverse_existence.expand(&args);
    let existence = rules::tautology(
        config,
        Sequent::new(
            assumptions.clone(),
            vec![Formula::exists(&var("y"), inverse_of_x.clone())],
        ),
        &[
            &tactics::unfold(&definitions.group, &args),
            &tactics::unfold(&definitions.inverse_existence, &args),
            &tactics::forall_elim(&existence_law, &x)?,
        ],
    )?;

    let (other, body) = lemmas::uniqueness_parts(&var("y"), &inverse_of_x);
    let v = Term::from(&other);
    let (yx, xv) = (op(&y, &x), op(&x, &v));
    let left_neutral = part(
        &definitions.is_neutral.expand(&[yx.clone(), g.clone(), star.clone()]),
        1,
    )?;
    let right_neutral = part(
        &definitions.is_neutral.expand(&[xv.clone(), g.clone(), star.clone()]),
        1,
    )?;
    let associativity = definitions.associativity.expand(&args);
    let (yx_v, y_xv) = (op(&yx, &v), op(&y, &xv));

    let uniqueness = rules::tautology(
        config,
        Sequent::new(assumptions, vec![body]),
        &[
            &tactics::unfold(&definitions.group, &args),
            &tactics::unfold(&definitions.associativity, &args),
            &tactics::unfold(&definitions.is_inverse, &[y.clone(), x.clone(), g.clone(), star.clone()]),
            &tactics::unfold(&definitions.is_inverse, &[v.clone(), x.clone(), g.clone(), star.clone()]),
            &tactics::unfold(&definitions.is_neutral, &[yx.clone(), g.clone(), star.clone()]),
            &tactics::unfold(&definitions.is_neutral, &[xv.clone(), g.clone(), star.clone()]),
            &tactics::forall_elim(&left_neutral, &v)?,
            &tactics::forall_elim(&right_neutral, &y)?,
            &tactics::forall_elim_all(&associativity, &[y.clone(), x.clone(), v.clone()])?,
            &tactics::eq_symmetry(&yx_v, &v)?,
            &tactics::eq_transitivity(&v, &yx_v, &y_xv)?,
            &tactics::eq_transitivity(&v, &y_xv, &y)?,
            &tactics::eq_symmetry(&v, &y)?,
        ],
    )?;
    let uniqueness = lemmas::generalize_uniqueness(&uniqueness, &var("y"), &inverse_of_x)?;
    lemmas::exists_one_from_parts(config, &existence, &uniqueness, &var("y"), &inverse_of_x)
}

impl Inverse {
    pub fn build(
        theory: &mut Theory,
        sets: &SetTheory,
        definitions: &GroupDefinitions,
        identity: &Identity,
    ) -> Result<Inverse, LibraryError> {
        let config = *theory.config();
        let (g, star, x, y) = (term("G"), term("*"), term("x"), term("y"));
        let group = definitions.group(&g, &star);
        let x_in_g = sets.member(&x, &g);
        let assumptions = vec![group.clone(), x_in_g.clone()];

        let uniqueness = inverse_uniqueness(theory, sets, definitions)?;
        let uniqueness = theory.record("inverse_uniqueness", uniqueness)?;
        let description = theory.describe(DescriptionRequest::new(
            "inverse",
            vec![var("x"), var("G"), var("*")],
            var("y"),
            definitions.is_inverse(&y, &x, &g, &star),
            uniqueness.clone(),
        ))?;
        debug!(definition = %description.complete_definition(), "inverse");
        theory.record("inverse_definition", description.definition_theorem().clone())?;
        theory.record("inverse_fallback", description.fallback()?)?;

        // The description folds the assumptions into one premise. Split them back out.
        let i = description.apply(vec![x.clone(), g.clone(), star.clone()]);
        let is_inverse = restate(
            &config,
            &description.satisfies()?,
            assumptions.clone(),
            vec![definitions.is_inverse(&i, &x, &g, &star)],
        )?;
        let characterization = restate(
            &config,
            &description.characterization()?,
            assumptions.clone(),
            vec![Formula::iff(
                i.equals(&y),
                definitions.is_inverse(&y, &x, &g, &star),
            )],
        )?;
        let is_inverse = theory.record("inverse_is_inverse", is_inverse)?;
        let characterization = theory.record("inverse_characterization", characterization)?;

        let symmetry = rules::tautology(
            &config,
            Sequent::new(
                vec![x_in_g.clone(), definitions.is_inverse(&y, &x, &g, &star)],
                vec![definitions.is_inverse(&x, &y, &g, &star)],
            ),
            &[
                &tactics::unfold(&definitions.is_inverse, &[y.clone(), x.clone(), g.clone(), star.clone()]),
                &tactics::unfold(&definitions.is_inverse, &[x.clone(), y.clone(), g.clone(), star.clone()]),
            ],
        )?;
        let symmetry = theory.record("inverse_symmetry", symmetry)?;

        // x is an inverse of inverse(x), so it is the inverse of inverse(x).
        let double = description.apply(vec![i.clone(), g.clone(), star.clone()]);
        let involution = rules::tautology(
            &config,
            Sequent::new(assumptions.clone(), vec![double.equals(&x)]),
            &[
                &is_inverse,
                &rules::instantiate(&symmetry, &Substitution::single(&var("y"), &i)),
                &tactics::unfold(&definitions.is_inverse, &[i.clone(), x.clone(), g.clone(), star.clone()]),
                &rules::instantiate(
                    &characterization,
                    &Substitution::from_pairs(vec![(var("x"), i.clone()), (var("y"), x.clone())]),
                ),
            ],
        )?;
        let involution = theory.record("inverse_is_involutive", involution)?;

        let e = identity.apply(&g, &star);
        let (xi, ix) = (sets.op(&x, &star, &i), sets.op(&i, &star, &x));
        let neutral_at = |value: &Term| {
            rules::instantiate(
                &identity.characterization,
                &Substitution::single(&var("e"), value),
            )
        };
        let cancellation = rules::tautology(
            &config,
            Sequent::new(
                assumptions,
                vec![Formula::and(vec![xi.equals(&e), ix.equals(&e)])],
            ),
            &[
                &is_inverse,
                &tactics::unfold(&definitions.is_inverse, &[i.clone(), x.clone(), g.clone(), star.clone()]),
                &neutral_at(&xi),
                &neutral_at(&ix),
                &tactics::eq_symmetry(&e, &xi)?,
                &tactics::eq_symmetry(&e, &ix)?,
            ],
        )?;
        let cancellation = theory.record("inverse_cancellation", cancellation)?;

        Ok(Inverse {
            uniqueness,
            description,
            is_inverse,
            characterization,
            symmetry,
            involution,
            cancellation,
        })
    }

    /// `inverse(x, G, *)`
    pub fn apply(&self, x: &Term, g: &Term, star: &Term) -> Term {
        self.description.apply(vec![x.clone(), g.clone(), star.clone()])
    }
}
