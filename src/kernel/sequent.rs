use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::kernel::formula::Formula;
use crate::kernel::substitution::Substitution;
use crate::kernel::term::Variable;

/// A sequent `Γ ⊢ Δ`: the conjunction of the left side implies the disjunction of the right side.
/// Both sides are sets modulo α-equivalence. Insertion order is kept for display.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Sequent {
    left: Vec<Formula>,
    right: Vec<Formula>,
}

fn push_unique(side: &mut Vec<Formula>, formula: Formula) {
    if !side.contains(&formula) {
        side.push(formula);
    }
}

fn is_subset(a: &[Formula], b: &[Formula]) -> bool {
    a.iter().all(|f| b.contains(f))
}

impl Sequent {
    pub fn new(
        left: impl IntoIterator<Item = Formula>,
        right: impl IntoIterator<Item = Formula>,
    ) -> Sequent {
        let mut answer = Sequent::default();
        for f in left {
            answer.add_left(f);
        }
        for f in right {
            answer.add_right(f);
        }
        answer
    }

    /// `⊢ formula`
    pub fn conclusion(formula: Formula) -> Sequent {
        Sequent::new(vec![], vec![formula])
    }

    pub fn left(&self) -> &[Formula] {
        &self.left
    }

    pub fn right(&self) -> &[Formula] {
        &self.right
    }

    pub fn add_left(&mut self, formula: Formula) {
        push_unique(&mut self.left, formula);
    }

    pub fn add_right(&mut self, formula: Formula) {
        push_unique(&mut self.right, formula);
    }

    pub fn contains_left(&self, formula: &Formula) -> bool {
        self.left.contains(formula)
    }

    pub fn contains_right(&self, formula: &Formula) -> bool {
        self.right.contains(formula)
    }

    /// The left side with one formula removed.
    pub fn left_without(&self, formula: &Formula) -> Vec<Formula> {
        self.left.iter().filter(|f| *f != formula).cloned().collect()
    }

    /// The right side with one formula removed.
    pub fn right_without(&self, formula: &Formula) -> Vec<Formula> {
        self.right.iter().filter(|f| *f != formula).cloned().collect()
    }

    /// Whether every formula on each side of this sequent appears on the same side of `other`.
    /// If so, `other` follows from this sequent by weakening.
    pub fn is_subsequent_of(&self, other: &Sequent) -> bool {
        is_subset(&self.left, &other.left) && is_subset(&self.right, &other.right)
    }

    pub fn free_variables(&self) -> BTreeSet<Variable> {
        let mut answer = BTreeSet::new();
        for f in self.left.iter().chain(self.right.iter()) {
            answer.extend(f.free_variables());
        }
        answer
    }

    pub fn substitute(&self, substitution: &Substitution) -> Sequent {
        Sequent::new(
            self.left.iter().map(|f| f.substitute(substitution)),
            self.right.iter().map(|f| f.substitute(substitution)),
        )
    }

    /// The single formula on the right, if there is exactly one.
    pub fn single_conclusion(&self) -> Option<&Formula> {
        match self.right.as_slice() {
            [f] => Some(f),
            _ => None,
        }
    }
}

impl PartialEq for Sequent {
    fn eq(&self, other: &Sequent) -> bool {
        self.is_subsequent_of(other) && other.is_subsequent_of(self)
    }
}

impl Eq for Sequent {}

fn write_side(f: &mut fmt::Formatter, side: &[Formula]) -> fmt::Result {
    for (i, formula) in side.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", formula)?;
    }
    Ok(())
}

impl fmt::Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_side(f, &self.left)?;
        if self.left.is_empty() {
            write!(f, "⊢")?;
        } else {
            write!(f, " ⊢")?;
        }
        if !self.right.is_empty() {
            write!(f, " ")?;
            write_side(f, &self.right)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::symbol::PredicateSymbol;
    use crate::kernel::term::Term;

    fn atom(name: &str) -> Formula {
        Formula::predicate(&PredicateSymbol::new(name, 0), vec![])
    }

    #[test]
    fn test_sides_are_sets_modulo_alpha() {
        let q = PredicateSymbol::new("Q", 1);
        let a = Formula::forall(&Variable::new("x"), Formula::predicate(&q, vec![Term::var("x")]));
        let b = Formula::forall(&Variable::new("y"), Formula::predicate(&q, vec![Term::var("y")]));
        let s = Sequent::new(vec![a.clone(), b], vec![atom("P")]);
        assert_eq!(s.left().len(), 1);
        assert!(s.contains_left(&a));
    }

    #[test]
    fn test_equality_ignores_order() {
        let s = Sequent::new(vec![atom("A"), atom("B")], vec![atom("C")]);
        let t = Sequent::new(vec![atom("B"), atom("A")], vec![atom("C")]);
        assert_eq!(s, t);
        let u = Sequent::new(vec![atom("A")], vec![atom("C")]);
        assert_ne!(s, u);
        assert!(u.is_subsequent_of(&s));
    }

    #[test]
    fn test_display() {
        let s = Sequent::new(vec![atom("A"), atom("B")], vec![atom("C")]);
        assert_eq!(s.to_string(), "A, B ⊢ C");
        assert_eq!(Sequent::conclusion(atom("C")).to_string(), "⊢ C");
    }
}
