use crate::group_theory::{part, term, GroupDefinitions};
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::theorem::Theorem;
use crate::library::LibraryError;
use crate::set_theory::SetTheory;
use crate::tactics;
use crate::theory::Theory;

/// What a group's operation looks like as a set: a function defined on every pair of elements.
#[derive(Clone, Debug)]
pub struct OperationLemmas {
    /// `group(G, *) ⊢ functional(*)`
    pub functional: Theorem,

    /// `group(G, *), x ∈ G, y ∈ G ⊢ pair(x, y) ∈ relationDomain(*)`
    pub domain: Theorem,

    /// `group(G, *), x ∈ G, y ∈ G ⊢ op(x, *, y) ∈ G`
    pub closure: Theorem,
}

impl OperationLemmas {
    pub fn prove(
        theory: &mut Theory,
        sets: &SetTheory,
        definitions: &GroupDefinitions,
    ) -> Result<OperationLemmas, LibraryError> {
        let config = *theory.config();
        let (g, star, x, y) = (term("G"), term("*"), term("x"), term("y"));
        let args = [g.clone(), star.clone()];

        let group = tactics::unfold(&definitions.group, &args);
        let binary = tactics::unfold(&definitions.binary_operation, &args);
        let law = part(&definitions.binary_operation.expand(&args), 1)?;
        let at_xy = tactics::forall_elim_all(&law, &[x.clone(), y.clone()])?;

        let group_atom = definitions.group(&g, &star);
        let functional = rules::tautology(
            &config,
            Sequent::new(vec![group_atom.clone()], vec![sets.functional(&star)]),
            &[&group, &binary],
        )?;

        let assumptions = vec![group_atom, sets.member(&x, &g), sets.member(&y, &g)];
        let domain = rules::tautology(
            &config,
            Sequent::new(
                assumptions.clone(),
                vec![sets.member(&sets.pair(&x, &y), &sets.relation_domain(&star))],
            ),
            &[&group, &binary, &at_xy],
        )?;
        let closure = rules::tautology(
            &config,
            Sequent::new(assumptions, vec![sets.member(&sets.op(&x, &star, &y), &g)]),
            &[&group, &binary, &at_xy],
        )?;

        Ok(OperationLemmas {
            functional: theory.record("group_functional", functional)?,
            domain: theory.record("group_domain", domain)?,
            closure: theory.record("group_closure", closure)?,
        })
    }
}
