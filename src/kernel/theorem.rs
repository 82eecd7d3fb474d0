use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::kernel::error::{ProofError, Result};
use crate::kernel::formula::Formula;
use crate::kernel::sequent::Sequent;
use crate::proof_step::{ProofStep, Rule};

/// One step in the history of a signature: a declaration, an axiom or a definition.
///
/// Extensions form a tree. A signature points at its latest extension and every theorem points
/// at the latest extension its leaves rely on. Premises can only be combined when their
/// extensions lie on one branch, so signatures that diverged after a clone never mix.
#[derive(Debug)]
pub(in crate::kernel) struct Extension {
    parent: Option<Arc<Extension>>,
    depth: usize,
}

impl Extension {
    pub(in crate::kernel) fn root() -> Arc<Extension> {
        Arc::new(Extension {
            parent: None,
            depth: 0,
        })
    }

    pub(in crate::kernel) fn child(parent: &Arc<Extension>) -> Arc<Extension> {
        Arc::new(Extension {
            parent: Some(parent.clone()),
            depth: parent.depth + 1,
        })
    }

    /// Whether `earlier` is this extension or one of its ancestors.
    pub(in crate::kernel) fn extends(&self, earlier: &Extension) -> bool {
        let mut node = self;
        while node.depth > earlier.depth {
            match &node.parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
        std::ptr::eq(node, earlier)
    }
}

// The latest extension among the premises.
fn latest_extension(rule: &'static str, premises: &[Theorem]) -> Result<Option<Arc<Extension>>> {
    let mut latest: Option<&Arc<Extension>> = None;
    for premise in premises {
        let Some(extension) = premise.extension() else {
            continue;
        };
        latest = match latest {
            None => Some(extension),
            Some(current) if current.extends(extension) => Some(current),
            Some(current) if extension.extends(current) => Some(extension),
            Some(_) => {
                return Err(ProofError::rejected(
                    rule,
                    format!("{} was proved in a different signature", premise),
                ))
            }
        };
    }
    Ok(latest.cloned())
}

#[derive(Debug)]
struct TheoremCell {
    sequent: Sequent,
    step: ProofStep,
    premises: Vec<Theorem>,

    // None for theorems that hold in every signature, like hypotheses.
    extension: Option<Arc<Extension>>,
}

/// A sequent together with the derivation that proves it.
///
/// Theorems can only be created by the kernel rules, so holding one means the sequent was proved.
/// They are immutable and cheap to clone; clones share the derivation.
#[derive(Clone, Debug)]
pub struct Theorem(Arc<TheoremCell>);

impl Theorem {
    fn build(
        sequent: Sequent,
        rule: Rule,
        premises: Vec<Theorem>,
        extension: Option<Arc<Extension>>,
    ) -> Theorem {
        let step = ProofStep::new(rule, premises.iter().map(|p| p.step().depth));
        Theorem(Arc::new(TheoremCell {
            sequent,
            step,
            premises,
            extension,
        }))
    }

    /// A leaf that holds in every signature.
    pub(in crate::kernel) fn leaf(sequent: Sequent, rule: Rule) -> Theorem {
        Theorem::build(sequent, rule, vec![], None)
    }

    /// A single-premise inference, valid wherever its premise is.
    pub(in crate::kernel) fn infer(sequent: Sequent, rule: Rule, premise: &Theorem) -> Theorem {
        let extension = premise.extension().cloned();
        Theorem::build(sequent, rule, vec![premise.clone()], extension)
    }

    /// An inference from several premises, which must come from one signature history.
    pub(in crate::kernel) fn combine(
        name: &'static str,
        sequent: Sequent,
        rule: Rule,
        premises: Vec<Theorem>,
    ) -> Result<Theorem> {
        let extension = latest_extension(name, &premises)?;
        Ok(Theorem::build(sequent, rule, premises, extension))
    }

    /// An axiom or definition. The caller checks that the premises belong to `extension`.
    pub(in crate::kernel) fn extend(
        sequent: Sequent,
        rule: Rule,
        premises: Vec<Theorem>,
        extension: Arc<Extension>,
    ) -> Theorem {
        Theorem::build(sequent, rule, premises, Some(extension))
    }

    pub(in crate::kernel) fn extension(&self) -> Option<&Arc<Extension>> {
        self.0.extension.as_ref()
    }

    pub fn sequent(&self) -> &Sequent {
        &self.0.sequent
    }

    pub fn step(&self) -> &ProofStep {
        &self.0.step
    }

    pub fn rule(&self) -> &Rule {
        &self.0.step.rule
    }

    pub fn premises(&self) -> &[Theorem] {
        &self.0.premises
    }

    pub fn assumptions(&self) -> &[Formula] {
        self.0.sequent.left()
    }

    pub fn conclusions(&self) -> &[Formula] {
        self.0.sequent.right()
    }

    /// The conclusion of a theorem with exactly one formula on the right.
    pub fn conclusion(&self) -> Option<&Formula> {
        self.0.sequent.single_conclusion()
    }

    pub fn is_unconditional(&self) -> bool {
        self.0.sequent.left().is_empty()
    }

    /// Whether the two values are the same theorem object, not just the same sequent.
    pub fn same_as(&self, other: &Theorem) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// An identity key for this theorem object, stable while it is alive.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Whether this theorem proves `sequent`, possibly after weakening.
    pub fn proves(&self, sequent: &Sequent) -> bool {
        self.0.sequent.is_subsequent_of(sequent)
    }

    /// The number of distinct inferences in the derivation.
    pub fn size(&self) -> usize {
        let mut seen = HashSet::new();
        let mut stack = vec![self];
        while let Some(theorem) = stack.pop() {
            if seen.insert(theorem.id()) {
                stack.extend(theorem.premises());
            }
        }
        seen.len()
    }
}

impl fmt::Display for Theorem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.sequent)
    }
}
