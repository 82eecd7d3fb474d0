use tracing::trace;

use crate::group_theory::{term, var, GroupDefinitions, OperationLemmas};
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::substitution::Substitution;
use crate::kernel::theorem::Theorem;
use crate::library::LibraryError;
use crate::set_theory::SetTheory;
use crate::tactics;
use crate::theory::Theory;

/// `subgroup(H, G, *), x ∈ H, y ∈ H ⊢ op(x, restrictedFunction(*, H × H), y) = op(x, *, y)`
///
/// The subgroup's operation is a subset of the group's, so the edge it has at `pair(x, y)`
/// is also an edge of `*`. Since `*` is functional there, the two applications agree.
pub fn operation_coincidence(
    theory: &Theory,
    sets: &SetTheory,
    definitions: &GroupDefinitions,
    operation: &OperationLemmas,
) -> Result<Theorem, LibraryError> {
    let config = theory.config();
    let (h, g, star, x, y) = (term("H"), term("G"), term("*"), term("x"), term("y"));
    let product = sets.cartesian_product(&h, &h);
    let restricted = sets.restricted_function(&star, &product);
    let point = sets.pair(&x, &y);
    let restricted_value = sets.app(&restricted, &point);
    let value = sets.app(&star, &point);

    // The group lemmas, read for the subgroup's operation
    let in_subgroup = Substitution::from_pairs(vec![
        (var("G"), h.clone()),
        (var("*"), restricted.clone()),
    ]);
    let restricted_functional = rules::instantiate(&operation.functional, &in_subgroup);
    let restricted_domain = rules::instantiate(&operation.domain, &in_subgroup);

    // pair(pair(x, y), app(restriction, pair(x, y))) ∈ *
    let edge = sets.pair(&point, &restricted_value);
    let restricted_edge = sets.application_edge(&restricted, &point)?;
    let inherited_edge = rules::instantiate(
        &sets.restriction_edges,
        &Substitution::from_pairs(vec![
            (var("p"), edge),
            (var("f"), star.clone()),
            (var("d"), product),
        ]),
    );

    let inclusion = sets.subset.expand(&[h.clone(), g.clone()]);
    let subset_args = [h.clone(), g.clone()];

    let result = rules::tautology(
        config,
        Sequent::new(
            vec![
                definitions.subgroup(&h, &g, &star),
                sets.member(&x, &h),
                sets.member(&y, &h),
            ],
            vec![restricted_value.equals(&value)],
        ),
        &[
            &tactics::unfold(&definitions.subgroup, &[h.clone(), g.clone(), star.clone()]),
            &restricted_functional,
            &restricted_domain,
            &restricted_edge,
            &inherited_edge,
            &tactics::unfold(&sets.subset, &subset_args),
            &tactics::forall_elim(&inclusion, &x)?,
            &tactics::forall_elim(&inclusion, &y)?,
            &operation.functional,
            &operation.domain,
            &sets.app.instantiate_definition(&[star.clone(), point.clone()], &restricted_value)?,
            &tactics::eq_symmetry(&value, &restricted_value)?,
        ],
    )?;
    trace!(theorem = %result, "subgroup operation coincidence");
    Ok(result)
}
