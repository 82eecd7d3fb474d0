use std::fmt;
use std::ops::Not;

/// A propositional literal: a variable id and a sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    pub var: u32,
    pub positive: bool,
}

impl Literal {
    pub fn positive(var: u32) -> Literal {
        Literal {
            var,
            positive: true,
        }
    }

    pub fn negative(var: u32) -> Literal {
        Literal {
            var,
            positive: false,
        }
    }

    /// The truth value of this literal under a partial assignment, if its variable is assigned.
    pub fn value(&self, assignment: &[Option<bool>]) -> Option<bool> {
        assignment[self.var as usize].map(|v| v == self.positive)
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            positive: !self.positive,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.positive {
            write!(f, "p{}", self.var)
        } else {
            write!(f, "¬p{}", self.var)
        }
    }
}

/// A CNF (Conjunctive Normal Form) formula represented as a vector of clauses,
/// where each clause is a vector of literals.
///
/// An empty CNF (no clauses) represents "true".
/// A CNF containing an empty clause represents "false".
/// Variable ids have the same meaning across all clauses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CNF(Vec<Vec<Literal>>);

impl CNF {
    /// Creates an empty CNF representing "true".
    pub fn true_value() -> Self {
        CNF(vec![])
    }

    /// Creates a CNF with an empty clause representing "false".
    pub fn false_value() -> Self {
        CNF(vec![vec![]])
    }

    pub fn from_literal(literal: Literal) -> Self {
        CNF(vec![vec![literal]])
    }

    /// The 'and' of two CNF formulas.
    /// Simply concatenates the clauses from both formulas.
    pub fn and(mut self, other: CNF) -> Self {
        self.0.extend(other.0);
        self
    }

    pub fn push_clause(&mut self, clause: Vec<Literal>) {
        self.0.push(clause);
    }

    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One more than the largest variable id used.
    pub fn num_vars(&self) -> usize {
        self.0
            .iter()
            .flatten()
            .map(|lit| lit.var as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Whether some assignment satisfies every clause.
    /// DPLL with unit propagation.
    pub fn is_satisfiable(&self) -> bool {
        let mut assignment = vec![None; self.num_vars()];
        self.search(&mut assignment)
    }

    fn search(&self, assignment: &mut Vec<Option<bool>>) -> bool {
        let mut trail = vec![];
        if !self.propagate(assignment, &mut trail) {
            undo(assignment, &trail);
            return false;
        }
        let Some(var) = self.pick_branch(assignment) else {
            // Every clause is satisfied
            return true;
        };
        for value in [true, false] {
            assignment[var] = Some(value);
            if self.search(assignment) {
                return true;
            }
            assignment[var] = None;
        }
        undo(assignment, &trail);
        false
    }

    // Assigns the literal of every unit clause until nothing changes.
    // Returns false if some clause has all of its literals false.
    fn propagate(&self, assignment: &mut [Option<bool>], trail: &mut Vec<usize>) -> bool {
        loop {
            let mut changed = false;
            for clause in &self.0 {
                let mut unassigned = None;
                let mut open = 0;
                let mut satisfied = false;
                for lit in clause {
                    match lit.value(assignment) {
                        Some(true) => {
                            satisfied = true;
                            break;
                        }
                        Some(false) => {}
                        None => {
                            open += 1;
                            unassigned = Some(*lit);
                        }
                    }
                }
                if satisfied {
                    continue;
                }
                match (open, unassigned) {
                    (0, _) => return false,
                    (1, Some(lit)) => {
                        assignment[lit.var as usize] = Some(lit.positive);
                        trail.push(lit.var as usize);
                        changed = true;
                    }
                    _ => {}
                }
            }
            if !changed {
                return true;
            }
        }
    }

    // An unassigned variable from a clause that is not yet satisfied.
    fn pick_branch(&self, assignment: &[Option<bool>]) -> Option<usize> {
        for clause in &self.0 {
            if clause.iter().any(|lit| lit.value(assignment) == Some(true)) {
                continue;
            }
            if let Some(lit) = clause.iter().find(|lit| lit.value(assignment).is_none()) {
                return Some(lit.var as usize);
            }
        }
        None
    }
}

fn undo(assignment: &mut [Option<bool>], trail: &[usize]) {
    for var in trail {
        assignment[*var] = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(var: u32) -> Literal {
        Literal::positive(var)
    }

    #[test]
    fn test_constants() {
        assert!(CNF::true_value().is_satisfiable());
        assert!(!CNF::false_value().is_satisfiable());
    }

    #[test]
    fn test_unit_propagation_conflict() {
        // p0, p0 ⇒ p1, ¬p1
        let cnf = CNF::from_literal(p(0))
            .and(CNF(vec![vec![!p(0), p(1)]]))
            .and(CNF::from_literal(!p(1)));
        assert!(!cnf.is_satisfiable());
    }

    #[test]
    fn test_needs_branching() {
        // (p0 ∨ p1) ∧ (¬p0 ∨ p1) ∧ (p0 ∨ ¬p1) is satisfied by p0 = p1 = true
        let mut cnf = CNF::true_value();
        cnf.push_clause(vec![p(0), p(1)]);
        cnf.push_clause(vec![!p(0), p(1)]);
        cnf.push_clause(vec![p(0), !p(1)]);
        assert!(cnf.is_satisfiable());
        cnf.push_clause(vec![!p(0), !p(1)]);
        assert!(!cnf.is_satisfiable());
    }
}
