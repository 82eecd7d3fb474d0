use std::collections::HashMap;

use tracing::trace;

use crate::cnf::{Literal, CNF};
use crate::kernel::formula::Formula;
use crate::kernel::sequent::Sequent;

/// Limits for the propositional checker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckerConfig {
    /// The largest number of distinct atoms a single check may involve.
    pub max_atoms: usize,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig { max_atoms: 64 }
    }
}

/// The checker decides whether a sequent follows propositionally from known sequents.
///
/// Predicates, equalities and quantified formulas are treated as atoms, identified up to
/// α-equivalence. Everything is Tseitin-encoded into one CNF, and the goal holds when
/// the known sequents together with the negated goal are unsatisfiable.
#[derive(Clone, Debug)]
pub struct Checker {
    config: CheckerConfig,
    cnf: CNF,

    // Tseitin literal for every formula encoded so far.
    literals: HashMap<Formula, Literal>,

    num_atoms: usize,
    next_var: u32,

    // Variable 0 is constrained to be true and encodes ⊤.
    truth: Literal,
}

impl Checker {
    pub fn new(config: CheckerConfig) -> Self {
        let truth = Literal::positive(0);
        Checker {
            config,
            cnf: CNF::from_literal(truth),
            literals: HashMap::new(),
            num_atoms: 0,
            next_var: 1,
            truth,
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.num_atoms
    }

    /// Whether the atom limit has been passed.
    pub fn over_limit(&self) -> bool {
        self.num_atoms > self.config.max_atoms
    }

    fn new_var(&mut self) -> Literal {
        let lit = Literal::positive(self.next_var);
        self.next_var += 1;
        lit
    }

    fn encode_all(&mut self, formulas: &[Formula]) -> Vec<Literal> {
        formulas.iter().map(|f| self.encode(f)).collect()
    }

    // Returns a literal that is equivalent to the formula under the clauses added so far.
    fn encode(&mut self, formula: &Formula) -> Literal {
        if let Some(lit) = self.literals.get(formula) {
            return *lit;
        }
        let lit = match formula {
            Formula::True => self.truth,
            Formula::False => !self.truth,
            Formula::Not(f) => !self.encode(f),
            Formula::And(fs) => {
                let parts = self.encode_all(fs);
                self.define_and(&parts)
            }
            Formula::Or(fs) => {
                let parts = self.encode_all(fs);
                self.define_or(&parts)
            }
            Formula::Implies(a, b) => {
                let a = self.encode(a);
                let b = self.encode(b);
                self.define_or(&[!a, b])
            }
            Formula::Iff(a, b) => {
                let a = self.encode(a);
                let b = self.encode(b);
                let v = self.new_var();
                self.cnf.push_clause(vec![!v, !a, b]);
                self.cnf.push_clause(vec![!v, a, !b]);
                self.cnf.push_clause(vec![v, a, b]);
                self.cnf.push_clause(vec![v, !a, !b]);
                v
            }
            _ => {
                self.num_atoms += 1;
                trace!(atom = %formula, var = self.next_var, "new atom");
                self.new_var()
            }
        };
        self.literals.insert(formula.clone(), lit);
        lit
    }

    fn define_and(&mut self, parts: &[Literal]) -> Literal {
        let v = self.new_var();
        let mut long = vec![v];
        for part in parts {
            self.cnf.push_clause(vec![!v, *part]);
            long.push(!*part);
        }
        self.cnf.push_clause(long);
        v
    }

    fn define_or(&mut self, parts: &[Literal]) -> Literal {
        let v = self.new_var();
        let mut long = vec![!v];
        for part in parts {
            self.cnf.push_clause(vec![v, !*part]);
            long.push(*part);
        }
        self.cnf.push_clause(long);
        v
    }

    /// Adds a true sequent: the conjunction of its left side implies the disjunction of its right side.
    pub fn add_sequent(&mut self, sequent: &Sequent) {
        let left = self.encode_all(sequent.left());
        let right = self.encode_all(sequent.right());
        let clause = left.into_iter().map(|lit| !lit).chain(right).collect();
        self.cnf.push_clause(clause);
    }

    /// Adds the negation of a sequent: every left formula is true and every right formula is false.
    pub fn add_negated_sequent(&mut self, sequent: &Sequent) {
        for lit in self.encode_all(sequent.left()) {
            self.cnf.push_clause(vec![lit]);
        }
        for lit in self.encode_all(sequent.right()) {
            self.cnf.push_clause(vec![!lit]);
        }
    }

    /// Returns true if the clauses added so far have a contradiction.
    pub fn has_contradiction(&self) -> bool {
        !self.cnf.is_satisfiable()
    }

    /// Whether `goal` follows propositionally from `premises`.
    /// Returns None if the atom limit was exceeded, in which case nothing is decided.
    pub fn check(&mut self, premises: &[&Sequent], goal: &Sequent) -> Option<bool> {
        for premise in premises {
            self.add_sequent(premise);
        }
        self.add_negated_sequent(goal);
        if self.over_limit() {
            return None;
        }
        let answer = self.has_contradiction();
        trace!(
            goal = %goal,
            atoms = self.num_atoms,
            clauses = self.cnf.len(),
            answer,
            "propositional check"
        );
        Some(answer)
    }
}
