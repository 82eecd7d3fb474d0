//! Groups, stated over the set theory vocabulary.
//!
//! A group is a pair (G, *) where * is a functional relation whose domain covers G × G.
//! `op(x, *, y)` abbreviates `app(*, pair(x, y))`.

pub mod definitions;
pub mod identity;
pub mod inverse;
pub mod operation;
pub mod subgroup;

use tracing::info;

use crate::checker::CheckerConfig;
use crate::kernel::error::ProofError;
use crate::kernel::formula::Formula;
use crate::kernel::rules;
use crate::kernel::sequent::Sequent;
use crate::kernel::term::{Term, Variable};
use crate::kernel::theorem::Theorem;
use crate::library::LibraryError;
use crate::set_theory::SetTheory;
use crate::theory::Theory;

pub use definitions::GroupDefinitions;
pub use identity::Identity;
pub use inverse::Inverse;
pub use operation::OperationLemmas;

pub(crate) fn var(name: &str) -> Variable {
    Variable::new(name)
}

pub(crate) fn term(name: &str) -> Term {
    Term::var(name)
}

/// The conjunct at `index` of a conjunction.
pub(crate) fn part(formula: &Formula, index: usize) -> Result<Formula, ProofError> {
    formula
        .as_and()
        .and_then(|conjuncts| conjuncts.get(index))
        .cloned()
        .ok_or_else(|| {
            ProofError::rejected("conjunct", format!("{} has no conjunct {}", formula, index))
        })
}

/// Restates a theorem with the given sides, which must follow propositionally.
/// Used to split a normalized premise back into separate assumptions.
pub(crate) fn restate(
    config: &CheckerConfig,
    theorem: &Theorem,
    left: Vec<Formula>,
    right: Vec<Formula>,
) -> Result<Theorem, ProofError> {
    rules::tautology(config, Sequent::new(left, right), &[theorem])
}

/// Everything the group layer proves.
#[derive(Clone, Debug)]
pub struct GroupTheory {
    pub definitions: GroupDefinitions,
    pub operation: OperationLemmas,
    pub identity: Identity,
    pub inverse: Inverse,

    /// `subgroup(H, G, *), x ∈ H, y ∈ H ⊢ op(x, restriction, y) = op(x, *, y)`
    pub subgroup_coincidence: Theorem,
}

impl GroupTheory {
    pub fn build(theory: &mut Theory, sets: &SetTheory) -> Result<GroupTheory, LibraryError> {
        let definitions = GroupDefinitions::define(theory, sets)?;
        info!("group definitions");

        let operation = OperationLemmas::prove(theory, sets, &definitions)?;
        let identity = Identity::build(theory, sets, &definitions)?;
        info!(identity = %identity.description.complete_definition(), "identity");
        let inverse = Inverse::build(theory, sets, &definitions, &identity)?;
        info!(inverse = %inverse.description.complete_definition(), "inverse");

        let subgroup_coincidence =
            subgroup::operation_coincidence(theory, sets, &definitions, &operation)?;
        let subgroup_coincidence = theory.record("subgroup_operation_coincidence", subgroup_coincidence)?;

        Ok(GroupTheory {
            definitions,
            operation,
            identity,
            inverse,
            subgroup_coincidence,
        })
    }
}
